//! Logout and status commands.

use anyhow::Result;
use livebet_business::format::format_datetime;
use tracing::instrument;

use crate::context::AppContext;
use crate::output::Output;

#[instrument(skip_all, name = "logout")]
pub fn run_logout(ctx: &mut AppContext) -> Result<()> {
    let out = Output::new();

    if !ctx.config.has_token() {
        out.dim("Not currently signed in.");
        return Ok(());
    }

    let username = ctx.config.username().unwrap_or("unknown").to_owned();
    ctx.clear_session()?;

    out.success(format!("Signed out '{username}'"));
    out.dim(format!(
        "Credentials removed from: {}",
        ctx.config_path.display()
    ));
    Ok(())
}

/// Reports the saved session. Expiry is judged locally; the backend has no token check.
#[instrument(skip_all, name = "status")]
pub fn run_status(ctx: &AppContext) {
    let out = Output::new();

    let Some(saved) = ctx.config.session() else {
        out.dim("Not signed in.");
        out.dim("Use 'livebet login' to sign in.");
        return;
    };

    if ctx.client.is_authenticated() {
        out.success(format!("Signed in as '{}'", saved.user.user_name));
        out.labeled("Expires", format_datetime(saved.expires_at));
    } else {
        out.warning(format!(
            "Session for '{}' expired at {}",
            saved.user.user_name,
            format_datetime(saved.expires_at)
        ));
        out.dim("Use 'livebet login' to sign in again.");
    }
    out.labeled("Backend", ctx.client.config().api_url());
    out.labeled("Config file", ctx.config_path.display());
}

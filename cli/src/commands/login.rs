//! Login command implementation.

use anyhow::{Context as _, Result};
use inquire::{Password, PasswordDisplayMode, Text};
use livebet_business::{AuthStatus, LoginInput, login};
use tracing::{error, info, instrument};

use crate::context::AppContext;
use crate::output::Output;

#[instrument(skip_all, name = "login")]
pub async fn run_login(ctx: &mut AppContext, username: Option<String>) -> Result<()> {
    let out = Output::new();

    out.header("Sign in to livebet");
    out.newline();

    let username = match username {
        Some(username) => username,
        None => Text::new("Username:")
            .prompt()
            .context("Failed to read username")?,
    };
    let password = Password::new("Password:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read password")?;

    info!(username = %username, "Attempting login");
    let session = login(&ctx.client, &LoginInput::new(username, password))
        .await
        .inspect_err(|e| error!("Login failed: {e}"))
        .context("Login failed")?;

    let status = AuthStatus::from_session(&session);
    let name = status.username().unwrap_or_default();
    ctx.save_session(&session)?;

    out.newline();
    out.success(format!("Signed in as {name}"));
    out.dim(format!("Session saved to {}", ctx.config_path.display()));
    Ok(())
}

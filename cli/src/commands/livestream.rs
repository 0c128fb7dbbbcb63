//! Livestream commands: create, record a result, and the details view.

use anyhow::{Context as _, Result};
use inquire::{Select, Text as Prompt};
use livebet_business::format::{format_datetime_str, format_vnd};
use livebet_business::resources::{
    CreateLiveStreamInput, LiveStream, LiveStreamResult, create_livestream,
    update_livestream_result,
};
use livebet_business::{Cell, Text};
use tracing::{error, instrument};

use crate::cli::Outcome;
use crate::context::AppContext;
use crate::output::Output;

const TIME_HELP: &str = "Vietnam time, YYYY-MM-DD HH:MM";

fn value_or_prompt(value: Option<String>, message: &str, help: Option<&str>) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    let mut prompt = Prompt::new(message);
    if let Some(help) = help {
        prompt = prompt.with_help_message(help);
    }
    prompt
        .prompt()
        .with_context(|| format!("Failed to read {}", message.trim_end_matches(':')))
}

#[instrument(skip_all, name = "livestream_create")]
pub async fn run_create(
    ctx: &AppContext,
    youtube_link: Option<String>,
    streamer: Option<String>,
    start: Option<String>,
    end: Option<String>,
) -> Result<()> {
    ctx.ensure_authenticated()?;
    let out = Output::new();
    let locale = ctx.locale;

    let input = CreateLiveStreamInput {
        youtube_link: value_or_prompt(youtube_link, "YouTube link:", None)?,
        streamer: value_or_prompt(streamer, "Streamer:", None)?,
        start_time: value_or_prompt(start, "Start time:", Some(TIME_HELP))?,
        end_time: value_or_prompt(end, "End time:", Some(TIME_HELP))?,
    };

    let created = create_livestream(&ctx.client, &input)
        .await
        .inspect_err(|e| error!("Create failed: {e}"))
        .context("Failed to create livestream")?;

    out.success(format!("Created livestream for {}", created.streamer));
    out.labeled(locale.t(Text::YoutubeLink), &created.youtube_link);
    out.labeled(locale.t(Text::StartTime), format_datetime_str(&created.start_time));
    out.labeled(locale.t(Text::EndTime), format_datetime_str(&created.end_time));
    out.dim(format!("Sent as {} to {} (UTC)", created.start_time, created.end_time));
    Ok(())
}

#[instrument(skip(ctx), name = "livestream_result")]
pub async fn run_result(ctx: &AppContext, id: i64, outcome: Outcome) -> Result<()> {
    ctx.ensure_authenticated()?;
    let result = LiveStreamResult::from(outcome);
    update_livestream_result(&ctx.client, id, result)
        .await
        .context("Failed to update livestream result")?;

    let label = result.badge(ctx.locale).plain();
    Output::new().success(format!("Livestream {id} marked as {label}"));
    Ok(())
}

fn print_badge(out: &Output, label: &str, cell: &Cell) {
    match cell {
        Cell::Badge { text, tone } => out.labeled_badge(label, text, *tone),
        other => out.labeled(label, other.plain()),
    }
}

/// Prints one livestream and, while it is in progress, offers to record its result.
pub async fn run_details(ctx: &AppContext, stream: &LiveStream) -> Result<()> {
    let out = Output::new();
    let locale = ctx.locale;

    out.labeled(locale.t(Text::Streamer), &stream.streamer);
    out.labeled(locale.t(Text::Duration), stream.duration());
    out.labeled(locale.t(Text::TotalPlay), stream.total_play);
    out.labeled(locale.t(Text::TotalAmount), format_vnd(stream.total));
    out.labeled(locale.t(Text::StartTime), format_datetime_str(&stream.start_time));
    out.labeled(locale.t(Text::EndTime), format_datetime_str(&stream.end_time));
    if let Some(video_id) = stream.video_id() {
        out.labeled(locale.t(Text::VideoId), video_id);
    }
    out.labeled(locale.t(Text::YoutubeLink), &stream.youtube_link);
    print_badge(&out, locale.t(Text::Status), &stream.status.badge(locale));
    out.dim(format!("  {}%", stream.status.progress_percent()));
    print_badge(&out, locale.t(Text::Result), &stream.result.badge(locale));

    if !stream.status.accepts_result() {
        return Ok(());
    }

    let win = locale.t(Text::MarkWin);
    let lose = locale.t(Text::MarkLose);
    out.newline();
    let choice = Select::new(locale.t(Text::UpdateResult), vec![win, lose])
        .prompt_skippable()
        .context("Failed to read result")?;
    let outcome = match choice {
        Some(choice) if choice == win => Outcome::Win,
        Some(_) => Outcome::Lose,
        None => return Ok(()),
    };
    run_result(ctx, stream.id, outcome).await
}

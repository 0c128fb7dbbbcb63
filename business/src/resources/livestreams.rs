use chrono::SecondsFormat;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{time_cell, time_key};
use crate::format::{
    format_duration_str, is_youtube_url, parse_datetime, parse_vietnam_local, truncate,
};
use crate::{
    ApiClient, ApiEnvelope, ApiError, CallOptions, Cell, Column, Locale, QueryParams, Resource,
    SortKey, Text, Tone,
};

pub const CREATE_LIVESTREAM_ENDPOINT: &str = "admin/livestream/create";
pub const UPDATE_LIVESTREAM_RESULT_ENDPOINT: &str = "admin/livestream/update-result";

const LINK_PREVIEW_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum LiveStreamResult {
    #[default]
    Undetermined,
    Lose,
    Win,
    Other(i64),
}

impl From<i64> for LiveStreamResult {
    fn from(raw: i64) -> Self {
        match raw {
            0 => Self::Undetermined,
            1 => Self::Lose,
            2 => Self::Win,
            other => Self::Other(other),
        }
    }
}

impl From<LiveStreamResult> for i64 {
    fn from(result: LiveStreamResult) -> Self {
        match result {
            LiveStreamResult::Undetermined => 0,
            LiveStreamResult::Lose => 1,
            LiveStreamResult::Win => 2,
            LiveStreamResult::Other(raw) => raw,
        }
    }
}

impl LiveStreamResult {
    pub fn badge(self, locale: Locale) -> Cell {
        match self {
            Self::Win => Cell::badge(locale.t(Text::Win), Tone::Success),
            Self::Lose => Cell::badge(locale.t(Text::Lose), Tone::Danger),
            Self::Undetermined | Self::Other(_) => {
                Cell::badge(locale.t(Text::Undetermined), Tone::Neutral)
            }
        }
    }

    /// Only a win or a loss can be recorded.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Win | Self::Lose)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LiveStreamStatus {
    #[default]
    Progress,
    Completed,
    Other(String),
}

impl From<String> for LiveStreamStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "progress" => Self::Progress,
            "completed" => Self::Completed,
            _ => Self::Other(raw),
        }
    }
}

impl From<LiveStreamStatus> for String {
    fn from(status: LiveStreamStatus) -> Self {
        status.as_str().to_owned()
    }
}

impl LiveStreamStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Progress => "progress",
            Self::Completed => "completed",
            Self::Other(raw) => raw,
        }
    }

    pub fn label(&self, locale: Locale) -> String {
        match self {
            Self::Progress => locale.t(Text::InProgress).to_owned(),
            Self::Completed => locale.t(Text::Completed).to_owned(),
            Self::Other(raw) => raw.clone(),
        }
    }

    pub fn badge(&self, locale: Locale) -> Cell {
        let tone = match self {
            Self::Progress => Tone::Primary,
            Self::Completed => Tone::Success,
            Self::Other(_) => Tone::Neutral,
        };
        Cell::badge(self.label(locale), tone)
    }

    /// Progress bar fill for the details view.
    pub fn progress_percent(&self) -> u8 {
        match self {
            Self::Progress => 75,
            Self::Completed => 100,
            Self::Other(_) => 0,
        }
    }

    pub fn accepts_result(&self) -> bool {
        matches!(self, Self::Progress)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStream {
    #[serde(rename = "_id")]
    pub object_id: String,
    #[serde(default)]
    pub youtube_link: String,
    #[serde(default)]
    pub streamer: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub users: Vec<serde_json::Value>,
    #[serde(default)]
    pub total_play: u64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub result: LiveStreamResult,
    #[serde(default)]
    pub status: LiveStreamStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    /// Numeric id used by the result update endpoint.
    #[serde(default)]
    pub id: i64,
}

impl LiveStream {
    pub fn duration(&self) -> String {
        format_duration_str(&self.start_time, &self.end_time)
    }

    pub fn video_id(&self) -> Option<&str> {
        crate::format::youtube_video_id(&self.youtube_link)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LiveStreams;

impl Resource for LiveStreams {
    type Row = LiveStream;

    const NAME: &'static str = "livestreams";
    const LIST_ENDPOINT: &'static str = "admin/livestream/list";
    const TITLE: Text = Text::LiveStreams;

    fn default_params() -> QueryParams {
        QueryParams::default()
    }

    fn columns(locale: Locale) -> Vec<Column<LiveStream>> {
        vec![
            Column::new("streamer", locale.t(Text::Streamer), |l: &LiveStream| {
                Cell::text(l.streamer.clone())
            })
            .sortable_by(|l: &LiveStream| SortKey::from(l.streamer.as_str())),
            Column::new("youtubeLink", locale.t(Text::YoutubeLink), |l: &LiveStream| {
                Cell::Link {
                    label: truncate(&l.youtube_link, LINK_PREVIEW_CHARS),
                    url: l.youtube_link.clone(),
                }
            }),
            // Ordered by start time; the backend has no duration field.
            Column::new("startTime", locale.t(Text::Duration), |l: &LiveStream| {
                Cell::text(l.duration())
            })
            .sortable_by(|l: &LiveStream| time_key(&l.start_time)),
            Column::new("totalPlay", locale.t(Text::TotalPlay), |l: &LiveStream| {
                Cell::text(l.total_play.to_string())
            })
            .sortable_by(|l: &LiveStream| SortKey::Number(l.total_play as f64))
            .align_right(),
            Column::new("total", locale.t(Text::TotalAmount), |l: &LiveStream| {
                Cell::currency(l.total)
            })
            .sortable_by(|l: &LiveStream| SortKey::Number(l.total))
            .align_right(),
            Column::new("result", locale.t(Text::Result), move |l: &LiveStream| {
                l.result.badge(locale)
            })
            .sortable_by(|l: &LiveStream| SortKey::from(i64::from(l.result))),
            Column::new("status", locale.t(Text::Status), move |l: &LiveStream| {
                l.status.badge(locale)
            })
            .sortable_by(|l: &LiveStream| SortKey::from(l.status.as_str())),
            Column::new("createdAt", locale.t(Text::CreatedAt), |l: &LiveStream| {
                time_cell(&l.created_at)
            })
            .sortable_by(|l: &LiveStream| time_key(&l.created_at)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("YouTube link is required")]
    MissingYoutubeLink,
    #[error("Streamer is required")]
    MissingStreamer,
    #[error("Start time is required")]
    MissingStartTime,
    #[error("End time is required")]
    MissingEndTime,
    #[error("`{0}` is not a YouTube link")]
    NotYoutube(String),
    #[error("Invalid {field}: `{value}`")]
    InvalidTime { field: &'static str, value: String },
    #[error("End time must be after start time")]
    EndBeforeStart,
    #[error("Result must be win (2) or lose (1), got {0}")]
    UnsettledResult(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Form state of the create dialog. Times are Vietnam wall-clock, `YYYY-MM-DD HH:MM`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateLiveStreamInput {
    pub youtube_link: String,
    pub streamer: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLiveStreamRequest {
    pub youtube_link: String,
    pub streamer: String,
    pub start_time: String,
    pub end_time: String,
}

impl CreateLiveStreamInput {
    /// Checks the form and converts its times to UTC.
    pub fn validate(&self) -> Result<CreateLiveStreamRequest, ValidationError> {
        let youtube_link = self.youtube_link.trim();
        let streamer = self.streamer.trim();
        let start = self.start_time.trim();
        let end = self.end_time.trim();

        if youtube_link.is_empty() {
            return Err(ValidationError::MissingYoutubeLink);
        }
        if streamer.is_empty() {
            return Err(ValidationError::MissingStreamer);
        }
        if start.is_empty() {
            return Err(ValidationError::MissingStartTime);
        }
        if end.is_empty() {
            return Err(ValidationError::MissingEndTime);
        }
        if !is_youtube_url(youtube_link) {
            return Err(ValidationError::NotYoutube(youtube_link.to_owned()));
        }

        let start_at = local_time("start time", start)?;
        let end_at = local_time("end time", end)?;
        if end_at <= start_at {
            return Err(ValidationError::EndBeforeStart);
        }

        Ok(CreateLiveStreamRequest {
            youtube_link: youtube_link.to_owned(),
            streamer: streamer.to_owned(),
            start_time: start_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            end_time: end_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

fn local_time(
    field: &'static str,
    raw: &str,
) -> Result<chrono::DateTime<chrono::Utc>, ValidationError> {
    parse_vietnam_local(raw)
        .or_else(|| parse_datetime(raw))
        .ok_or_else(|| ValidationError::InvalidTime {
            field,
            value: raw.to_owned(),
        })
}

#[derive(Debug, Serialize)]
struct UpdateResultRequest {
    id: i64,
    result: i64,
}

async fn mutate<B: Serialize>(
    client: &ApiClient,
    endpoint: &str,
    body: &B,
) -> Result<(), MutationError> {
    let envelope: ApiEnvelope<serde_json::Value> =
        client.call(endpoint, CallOptions::post(body)?).await?;
    if !envelope.success {
        let message = envelope
            .error_message()
            .unwrap_or("Request failed")
            .to_owned();
        warn!("{endpoint} rejected: {message}");
        return Err(MutationError::Rejected(message));
    }
    client.invalidate(LiveStreams::NAME);
    Ok(())
}

/// Validates and creates a livestream, then invalidates the livestream list.
pub async fn create_livestream(
    client: &ApiClient,
    input: &CreateLiveStreamInput,
) -> Result<CreateLiveStreamRequest, MutationError> {
    let request = input.validate()?;
    mutate(client, CREATE_LIVESTREAM_ENDPOINT, &request).await?;
    info!("Created livestream for {}", request.streamer);
    Ok(request)
}

/// Records a win or loss for the stream with numeric id `id`.
pub async fn update_livestream_result(
    client: &ApiClient,
    id: i64,
    result: LiveStreamResult,
) -> Result<(), MutationError> {
    if !result.is_settled() {
        return Err(ValidationError::UnsettledResult(result.into()).into());
    }
    let request = UpdateResultRequest {
        id,
        result: result.into(),
    };
    mutate(client, UPDATE_LIVESTREAM_RESULT_ENDPOINT, &request).await?;
    info!("Livestream {id} result set to {}", request.result);
    Ok(())
}

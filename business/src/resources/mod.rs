//! The five admin list resources and their column sets.

mod balance_history;
mod livestreams;
mod predicts;
mod transactions;
mod users;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::{capitalize, format_datetime_str};
use crate::{Cell, Locale, SortKey, Text, Tone};

pub use balance_history::{BalanceHistory, BalanceHistoryEntry};
pub use livestreams::{
    CREATE_LIVESTREAM_ENDPOINT, CreateLiveStreamInput, CreateLiveStreamRequest, LiveStream,
    LiveStreamResult, LiveStreamStatus, LiveStreams, MutationError,
    UPDATE_LIVESTREAM_RESULT_ENDPOINT, ValidationError, create_livestream,
    update_livestream_result,
};
pub use predicts::{Predict, Predicts};
pub use transactions::{Transaction, Transactions};
pub use users::{User, Users};

/// The user a predict or balance movement belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub bank: String,
}

/// Processing state of a money movement.
///
/// Unknown backend values are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordStatus {
    Success,
    Completed,
    Pending,
    Processing,
    Failed,
    Error,
    /// The backend spells this `unknow` on some records.
    Unknown,
    Other(String),
}

impl From<String> for RecordStatus {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "completed" => Self::Completed,
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "failed" => Self::Failed,
            "error" => Self::Error,
            "unknown" | "unknow" => Self::Unknown,
            _ => Self::Other(raw),
        }
    }
}

impl From<RecordStatus> for String {
    fn from(status: RecordStatus) -> Self {
        status.as_str().to_owned()
    }
}

impl RecordStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Failed => "failed",
            Self::Error => "error",
            Self::Unknown => "unknow",
            Self::Other(raw) => raw,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Success | Self::Completed => Tone::Success,
            Self::Pending | Self::Processing => Tone::Warning,
            Self::Failed | Self::Error => Tone::Danger,
            Self::Unknown | Self::Other(_) => Tone::Neutral,
        }
    }

    pub fn label(&self, locale: Locale) -> String {
        match self {
            Self::Success => locale.t(Text::Success).to_owned(),
            Self::Completed => locale.t(Text::Completed).to_owned(),
            Self::Pending => locale.t(Text::Pending).to_owned(),
            Self::Failed => locale.t(Text::Failed).to_owned(),
            other => capitalize(other.as_str()),
        }
    }

    pub fn badge(&self, locale: Locale) -> Cell {
        Cell::badge(self.label(locale), self.tone())
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a transaction or balance movement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MovementKind {
    Deposit,
    Withdraw,
    Transfer,
    Payment,
    Refund,
    Win,
    Play,
    Other(String),
}

impl From<String> for MovementKind {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "deposit" => Self::Deposit,
            "withdraw" | "withdrawal" => Self::Withdraw,
            "transfer" => Self::Transfer,
            "payment" => Self::Payment,
            "refund" => Self::Refund,
            "win" => Self::Win,
            "play" => Self::Play,
            _ => Self::Other(raw),
        }
    }
}

impl From<MovementKind> for String {
    fn from(kind: MovementKind) -> Self {
        kind.as_str().to_owned()
    }
}

impl MovementKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Transfer => "transfer",
            Self::Payment => "payment",
            Self::Refund => "refund",
            Self::Win => "win",
            Self::Play => "play",
            Self::Other(raw) => raw,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Deposit | Self::Win => Tone::Success,
            Self::Withdraw | Self::Play => Tone::Warning,
            Self::Transfer | Self::Payment => Tone::Primary,
            Self::Refund => Tone::Info,
            Self::Other(_) => Tone::Neutral,
        }
    }

    pub fn badge(&self) -> Cell {
        Cell::badge(capitalize(self.as_str()), self.tone())
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn time_cell(raw: &str) -> Cell {
    if raw.is_empty() {
        Cell::Empty
    } else {
        Cell::Muted(format_datetime_str(raw))
    }
}

fn win_badge(win: bool, locale: Locale) -> Cell {
    if win {
        Cell::badge(locale.t(Text::Win), Tone::Success)
    } else {
        Cell::badge(locale.t(Text::Lose), Tone::Danger)
    }
}

/// ISO-8601 strings sort chronologically as text.
fn time_key(raw: &str) -> SortKey {
    if raw.is_empty() {
        SortKey::Missing
    } else {
        SortKey::Text(raw.to_owned())
    }
}

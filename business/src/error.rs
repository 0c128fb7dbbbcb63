use thiserror::Error;

/// Failure of a backend call.
///
/// An envelope with `success: false` is not an error: it decodes fine and is
/// rendered as an empty table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No usable session token; nothing was sent.
    #[error("Not authenticated")]
    Unauthenticated,
    /// Non-2xx response. `message` is taken from the body when it has one.
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to encode request: {0}")]
    Encode(String),
    #[error("Failed to decode response: {0}")]
    Decode(String),
    /// The request was superseded or dropped before it finished.
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Authentication failures are never retried.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated | Self::Http { status: 401, .. } | Self::Http { status: 403, .. }
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

//! Response envelope shared by every backend endpoint.

use serde::{Deserialize, Serialize};

/// `{ success, result?, error? }` wrapper around every backend payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<R> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub result: Option<R>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

fn none<R>() -> Option<R> {
    None
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub status: Option<serde_json::Value>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Paged list payload. The backend omits the counters on some endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<T>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(
        rename = "totalPages",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

pub type PageEnvelope<T> = ApiEnvelope<PageResult<T>>;

impl<R> ApiEnvelope<R> {
    pub fn ok(result: R) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(ErrorBody {
                message: Some(message.into()),
                ..ErrorBody::default()
            }),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.message.as_deref())
    }
}

impl<T> PageEnvelope<T> {
    /// Rows to display; `None` for a failed envelope or one without `result.data`.
    pub fn rows(&self) -> Option<&[T]> {
        if !self.success {
            return None;
        }
        self.result.as_ref()?.data.as_deref()
    }

    pub fn page_result(&self) -> Option<&PageResult<T>> {
        self.result.as_ref()
    }
}

impl<T> PageResult<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            data: Some(data),
            total: None,
            total_pages: None,
            page: None,
            limit: None,
        }
    }

    pub fn paged(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit)) as u32
        };
        Self {
            data: Some(data),
            total: Some(total),
            total_pages: Some(total_pages),
            page: Some(page),
            limit: Some(limit),
        }
    }
}

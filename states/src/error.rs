use thiserror::Error;
use ustr::Ustr;

use crate::TaskId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Task {id:?} was superseded by generation {latest} for key {key}")]
    Superseded { id: TaskId, key: Ustr, latest: u64 },
    #[error("Task {id:?} was cancelled")]
    Cancelled { id: TaskId },
}

impl Error {
    pub fn superseded(id: TaskId, latest: u64) -> Self {
        Self::Superseded {
            id,
            key: id.key(),
            latest,
        }
    }

    pub fn cancelled(id: TaskId) -> Self {
        Self::Cancelled { id }
    }
}

//! Shared state primitives for the livebet admin front ends.
//!
//! - [`TaskId`] / [`TaskHandle`] / [`LatestTasks`]: generation-tagged async tasks with
//!   cooperative cancellation, used to drop responses of superseded requests.
//! - [`SyncStatus`]: freshness of a cached value.
//! - [`Clock`]: wall-clock abstraction so cache expiry can be tested without sleeping.

mod clock;
mod error;
mod sync_status;
mod task;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::Error;
pub use sync_status::SyncStatus;
pub use task::{LatestTasks, TaskHandle, TaskId};

//! Task identity and cooperative cancellation.
//!
//! Every request a query dispatches is tagged with a [`TaskId`]: the query key it
//! serves plus a generation number. [`LatestTasks`] hands out generations, cancels the
//! task it supersedes, and answers whether a finished task is still the latest one so
//! late responses can be dropped.
//!
//! ```ignore
//! let mut tasks = LatestTasks::default();
//! let first = tasks.begin(Ustr::from("users"));
//! let second = tasks.begin(Ustr::from("users"));
//!
//! assert!(first.is_cancelled());
//! assert!(!tasks.is_current(first.id()));
//! assert!(tasks.is_current(second.id()));
//! ```

use std::collections::HashMap;

use log::debug;
use tokio_util::sync::CancellationToken;
use ustr::Ustr;

use crate::Error;

/// Unique identifier for a spawned task.
///
/// Generations are monotonically increasing per [`LatestTasks`], so a higher
/// generation always means a more recently dispatched task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    key: Ustr,
    generation: u64,
}

impl TaskId {
    pub fn new(key: Ustr, generation: u64) -> Self {
        Self { key, generation }
    }

    /// Channel the task belongs to, usually a resource name.
    pub fn key(&self) -> Ustr {
        self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Handle to a spawned async task with cooperative cancellation support.
///
/// Clones share the cancellation token. Tasks observe it with
/// `tokio::select!` on [`CancellationToken::cancelled`].
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Returns a clone of the cancellation token for the async work.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Requests cooperative cancellation. The task stops at its next check point.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// Latest-wins task tracker.
///
/// Keeps one live task per key. Beginning a new task for a key cancels the previous
/// one; only the most recent generation is considered current.
#[derive(Debug, Default)]
pub struct LatestTasks {
    next_generation: u64,
    live: HashMap<Ustr, TaskHandle>,
}

impl LatestTasks {
    /// Starts a new task for `key`, cancelling whatever was running for it.
    pub fn begin(&mut self, key: Ustr) -> TaskHandle {
        self.next_generation += 1;
        let id = TaskId::new(key, self.next_generation);
        let handle = TaskHandle::new(id, CancellationToken::new());

        if let Some(previous) = self.live.insert(key, handle.clone()) {
            debug!(
                "task {key} generation {} superseded by {}",
                previous.id().generation(),
                id.generation()
            );
            previous.cancel();
        }

        handle
    }

    /// Whether `id` is still the latest task for its key.
    pub fn is_current(&self, id: TaskId) -> bool {
        self.live
            .get(&id.key())
            .is_some_and(|handle| handle.id() == id && !handle.is_cancelled())
    }

    /// Like [`Self::is_current`] but explains why a task is stale.
    pub fn check(&self, id: TaskId) -> Result<(), Error> {
        match self.live.get(&id.key()) {
            Some(handle) if handle.id() == id && !handle.is_cancelled() => Ok(()),
            Some(handle) if handle.id() == id => Err(Error::cancelled(id)),
            Some(handle) => Err(Error::superseded(id, handle.id().generation())),
            None => Err(Error::cancelled(id)),
        }
    }

    /// Marks `id` as done. Later calls to [`Self::is_current`] for it return false.
    pub fn finish(&mut self, id: TaskId) {
        if self.live.get(&id.key()).is_some_and(|h| h.id() == id) {
            self.live.remove(&id.key());
        }
    }

    /// Cancels every live task.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.live.drain() {
            handle.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_new_and_accessors() {
        let task_id = TaskId::new(Ustr::from("users"), 42);

        assert_eq!(task_id.key(), Ustr::from("users"));
        assert_eq!(task_id.generation(), 42);
    }

    #[test]
    fn task_id_equality() {
        let id1 = TaskId::new(Ustr::from("users"), 1);
        let id2 = TaskId::new(Ustr::from("users"), 1);
        let id3 = TaskId::new(Ustr::from("users"), 2);
        let id4 = TaskId::new(Ustr::from("predicts"), 1);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_ne!(id1, id4);
    }

    #[test]
    fn task_handle_clone_shares_token() {
        let handle1 = TaskHandle::new(TaskId::new(Ustr::from("users"), 1), CancellationToken::new());
        let handle2 = handle1.clone();
        let token = handle1.cancellation_token();

        handle1.cancel();

        assert!(handle2.is_cancelled());
        assert!(token.is_cancelled());
    }

    #[test]
    fn begin_cancels_previous_generation() {
        let mut tasks = LatestTasks::default();
        let key = Ustr::from("users");

        let first = tasks.begin(key);
        let second = tasks.begin(key);

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(second.id().generation() > first.id().generation());
        assert!(!tasks.is_current(first.id()));
        assert!(tasks.is_current(second.id()));
        assert_eq!(
            tasks.check(first.id()),
            Err(Error::superseded(first.id(), second.id().generation()))
        );
    }

    #[test]
    fn keys_are_independent() {
        let mut tasks = LatestTasks::default();

        let users = tasks.begin(Ustr::from("users"));
        let predicts = tasks.begin(Ustr::from("predicts"));

        assert!(tasks.is_current(users.id()));
        assert!(tasks.is_current(predicts.id()));
    }

    #[test]
    fn finish_removes_only_matching_generation() {
        let mut tasks = LatestTasks::default();
        let key = Ustr::from("users");

        let first = tasks.begin(key);
        let second = tasks.begin(key);

        tasks.finish(first.id());
        assert!(tasks.is_current(second.id()));

        tasks.finish(second.id());
        assert!(!tasks.is_current(second.id()));
        assert_eq!(tasks.check(second.id()), Err(Error::cancelled(second.id())));
    }

    #[test]
    fn cancel_all_cancels_live_handles() {
        let mut tasks = LatestTasks::default();
        let handle = tasks.begin(Ustr::from("users"));

        tasks.cancel_all();

        assert!(handle.is_cancelled());
        assert!(!tasks.is_current(handle.id()));
    }
}

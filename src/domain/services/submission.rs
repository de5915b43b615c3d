//! Tracks the single in-flight prediction request of a screen
//!
//! Each submission gets an increasing id. Only the current id may apply
//! its result; anything cancelled or superseded is dropped on arrival.

use tokio::task::{AbortHandle, JoinHandle};

/// Identifier of one submit attempt, unique per screen
pub type SubmissionId = u64;

#[derive(Debug, Default)]
pub struct SubmissionController {
    last_id: SubmissionId,
    active: Option<SubmissionId>,
    abort: Option<AbortHandle>,
    handle: Option<JoinHandle<()>>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an id for a new submission, cancelling any previous one
    pub fn begin(&mut self) -> SubmissionId {
        self.cancel();
        self.last_id += 1;
        self.active = Some(self.last_id);
        self.last_id
    }

    /// Attach the task running submission `id`
    pub fn attach(&mut self, id: SubmissionId, handle: JoinHandle<()>) {
        if self.active == Some(id) {
            self.abort = Some(handle.abort_handle());
            self.handle = Some(handle);
        } else {
            handle.abort();
        }
    }

    pub fn is_current(&self, id: SubmissionId) -> bool {
        self.active == Some(id)
    }

    pub fn active(&self) -> Option<SubmissionId> {
        self.active
    }

    /// Mark `id` complete. Returns false if it was cancelled or superseded.
    pub fn finish(&mut self, id: SubmissionId) -> bool {
        if !self.is_current(id) {
            return false;
        }
        self.active = None;
        self.abort = None;
        self.handle = None;
        true
    }

    /// Abort the current submission, returning its id
    pub fn cancel(&mut self) -> Option<SubmissionId> {
        if let Some(abort) = self.abort.take() {
            abort.abort();
        }
        self.handle = None;
        self.active.take()
    }

    /// Hand out the join handle so a caller can wait for completion.
    /// The submission stays current and can still be cancelled.
    pub fn take_handle(&mut self) -> Option<JoinHandle<()>> {
        self.handle.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_begin_and_finish() {
        let mut controller = SubmissionController::new();
        let id = controller.begin();
        assert!(controller.is_current(id));
        controller.attach(id, tokio::spawn(async {}));

        assert!(controller.finish(id));
        assert_eq!(controller.active(), None);
        // Second completion is ignored
        assert!(!controller.finish(id));
    }

    #[tokio::test]
    async fn test_cancel_aborts_task_and_rejects_late_finish() {
        let mut controller = SubmissionController::new();
        let id = controller.begin();
        let handle = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        controller.attach(id, handle);
        let waiter = controller.take_handle().unwrap();

        assert_eq!(controller.cancel(), Some(id));
        assert!(waiter.await.unwrap_err().is_cancelled());
        assert!(!controller.finish(id));
    }

    #[tokio::test]
    async fn test_begin_supersedes_previous() {
        let mut controller = SubmissionController::new();
        let first = controller.begin();
        let second = controller.begin();
        assert_ne!(first, second);
        assert!(!controller.is_current(first));
        assert!(controller.is_current(second));

        // A stale task attached late is not tracked
        let stale = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        controller.attach(first, stale);
        assert!(controller.take_handle().is_none());
    }
}

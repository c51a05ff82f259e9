//! Cancellable delayed task.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A callback that runs once after a delay unless cancelled first.
///
/// Runs on the Tokio runtime it was scheduled on, so a paused test clock
/// drives it like any other timer.
#[derive(Debug)]
pub struct DelayedTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl DelayedTask {
    /// Schedules `task` to run after `delay` on `runtime`.
    pub fn schedule<F>(runtime: &Handle, delay: Duration, task: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let cancel_child = cancel.clone();

        let handle = runtime.spawn(async move {
            let elapsed = cancel_child
                .run_until_cancelled(tokio::time::sleep(delay))
                .await;
            if elapsed.is_some() {
                task();
            }
        });

        Self { cancel, handle }
    }

    /// Prevents the task from running if it has not fired yet.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether the task has fired or been cancelled and exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

//! Trailing-edge debouncing on the tokio runtime.

use std::sync::Mutex;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Runs the most recently scheduled action once `delay` has passed
/// without a newer one.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `action`, cancelling the previously scheduled one.
    ///
    /// Outside a tokio runtime the action runs immediately.
    pub fn schedule(&self, action: impl FnOnce() + Send + 'static) {
        let Ok(handle) = Handle::try_current() else {
            log::debug!("no async runtime, running debounced action immediately");
            action();
            return;
        };

        let delay = self.delay;
        let task = handle.spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });

        if let Ok(mut pending) = self.pending.lock()
            && let Some(previous) = pending.replace(task)
        {
            previous.abort();
        }
    }

    /// Cancel the pending action, if any.
    pub fn cancel(&self) {
        if let Ok(mut pending) = self.pending.lock()
            && let Some(task) = pending.take()
        {
            task.abort();
        }
    }

    /// Whether an action is waiting to run.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .map(|p| p.as_ref().is_some_and(|t| !t.is_finished()))
            .unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

//! Cancellable timers and the debouncer built on them.
//!
//! `schedule` runs an action once after a delay unless its handle is cancelled
//! first. `Debouncer` keeps at most one pending timer: every call cancels the
//! previous one, so only the value of the last call within the quiet period is
//! ever delivered.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Handle to a scheduled action. Dropping it does not cancel the action.
#[derive(Debug)]
pub struct TimerHandle {
    handle: AbortHandle,
}

impl TimerHandle {
    pub fn cancel(self) {
        self.handle.abort();
    }
}

/// Runs `action` once after `delay` on the current tokio runtime.
pub fn schedule<F>(delay: Duration, action: F) -> TimerHandle
where
    F: FnOnce() + Send + 'static,
{
    let task = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        action();
    });
    TimerHandle {
        handle: task.abort_handle(),
    }
}

/// Coalesces rapid calls into one delivery after `delay` of quiet.
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<TimerHandle>,
    tx: mpsc::UnboundedSender<T>,
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            pending: None,
            tx,
            rx,
        }
    }

    /// Restarts the quiet period with `value` as the value to deliver.
    pub fn call(&mut self, value: T) {
        self.cancel();
        let tx = self.tx.clone();
        self.pending = Some(schedule(self.delay, move || {
            // The receiver lives as long as the debouncer; a send error only
            // means the debouncer is gone.
            let _ = tx.send(value);
        }));
    }

    /// Cancels the pending timer and discards a value that fired but was not taken.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
        while self.rx.try_recv().is_ok() {}
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Waits for the pending timer to fire. Returns `None` at once when nothing is pending.
    pub async fn fired(&mut self) -> Option<T> {
        self.pending.as_ref()?;
        let value = self.rx.recv().await;
        self.pending = None;
        value
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }
}

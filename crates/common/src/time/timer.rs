//! Cancelable one-shot timers
//!
//! A [`TimerHandle`] owns a scheduled callback. Cancelling it before the
//! deadline guarantees the callback never runs; cancelling it afterwards is a
//! harmless no-op. Owners replace a handle by cancelling the old one first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::sleep;
use tracing::trace;

/// A timer handle that can be used to cancel a timer
#[derive(Debug, Clone)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
    task: Option<AbortHandle>,
}

impl TimerHandle {
    fn new() -> Self {
        Self { cancelled: Arc::new(AtomicBool::new(false)), task: None }
    }

    /// Cancel the timer
    ///
    /// The flag is checked right before the callback runs, so a cancel that
    /// races with the deadline still wins.
    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(task) = &self.task {
            if !task.is_finished() {
                trace!("timer cancelled before firing");
            }
            task.abort();
        }
    }

    /// Check if the timer has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Check if the timer task has completed (fired or aborted)
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, AbortHandle::is_finished)
    }
}

/// Schedule `callback` to run once after `duration`
///
/// Must be called from within a tokio runtime.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
///
/// use casedesk_common::time::timer::timeout;
///
/// #[tokio::main]
/// async fn main() {
///     let handle = timeout(Duration::from_millis(300), || {
///         tracing::info!("quiet period elapsed");
///     });
///     handle.cancel();
/// }
/// ```
pub fn timeout<F>(duration: Duration, callback: F) -> TimerHandle
where
    F: FnOnce() + Send + 'static,
{
    let mut handle = TimerHandle::new();
    let cancelled = handle.cancelled.clone();

    let task = tokio::spawn(async move {
        sleep(duration).await;
        if cancelled.load(Ordering::SeqCst) {
            trace!("timer deadline reached after cancel, skipping callback");
            return;
        }
        trace!(after_ms = duration.as_millis() as u64, "timer fired");
        callback();
    });

    handle.task = Some(task.abort_handle());
    handle
}

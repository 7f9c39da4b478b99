// ── Request status tracking ──
//
// Every store operation runs inside `StatusTracker::track`, which raises
// the loading flag, clears the previous error, and records the failure
// message if the operation fails. The loading flag is cleared by a drop
// guard, so it comes down on every exit path: success, failure, or the
// caller dropping the future.

use std::future::Future;

use tokio::sync::watch;
use tracing::warn;

use crate::error::CoreError;

/// Loading flag and last error message of a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestStatus {
    pub loading: bool,
    pub error: Option<String>,
}

impl RequestStatus {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Shared `RequestStatus` for all operations of one store.
///
/// Overlapping operations share the flag; whichever finishes first lowers
/// it, and the last failure to be recorded wins.
pub struct StatusTracker {
    tx: watch::Sender<RequestStatus>,
}

/// Drop guard returned by [`StatusTracker::begin`].
#[must_use = "loading is cleared when the guard drops"]
pub struct InFlight<'a> {
    tracker: &'a StatusTracker,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.tracker.tx.send_modify(|s| s.loading = false);
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusTracker {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(RequestStatus::default());
        Self { tx }
    }

    /// Mark an operation as started.
    pub fn begin(&self) -> InFlight<'_> {
        self.tx.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        InFlight { tracker: self }
    }

    pub fn fail(&self, message: impl Into<String>) {
        let message = message.into();
        self.tx.send_modify(|s| s.error = Some(message));
    }

    /// Run `operation` with loading/error bookkeeping. Failures are recorded
    /// with the server's message or `fallback`, then returned unchanged.
    pub async fn track<T, F>(&self, fallback: &str, operation: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        let _in_flight = self.begin();
        match operation.await {
            Ok(value) => Ok(value),
            Err(err) => {
                let message = err.display_message(fallback);
                warn!(error = %err, "{message}");
                self.fail(message);
                Err(err)
            }
        }
    }

    pub fn current(&self) -> RequestStatus {
        self.tx.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.tx.borrow().error.clone()
    }

    pub fn clear_error(&self) {
        self.tx.send_if_modified(|s| s.error.take().is_some());
    }

    pub fn reset(&self) {
        self.tx.send_replace(RequestStatus::default());
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestStatus> {
        self.tx.subscribe()
    }
}

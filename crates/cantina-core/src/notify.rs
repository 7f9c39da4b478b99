// ── Toast notifications ──
//
// A queue of short user-facing messages. Each notification with a nonzero
// timeout schedules its own dismissal on the ambient tokio runtime; all
// pending dismissals are cancelled by `shutdown`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use strum::Display;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    /// Display time when the caller does not pick one.
    pub fn default_timeout(self) -> Duration {
        match self {
            Self::Success | Self::Info => Duration::from_millis(3000),
            Self::Warning => Duration::from_millis(4000),
            Self::Error => Duration::from_millis(5000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Zero keeps the notification until it is removed by hand.
    pub timeout: Duration,
}

impl Notification {
    pub fn is_sticky(&self) -> bool {
        self.timeout.is_zero()
    }
}

pub struct NotificationCenter {
    queue: Arc<watch::Sender<Vec<Notification>>>,
    next_id: AtomicU64,
    cancel: CancellationToken,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        let (queue, _) = watch::channel(Vec::new());
        Self {
            queue: Arc::new(queue),
            next_id: AtomicU64::new(1),
            cancel: CancellationToken::new(),
        }
    }

    /// Queue a notification and return its id.
    ///
    /// `timeout` defaults to the level's display time. Outside a tokio
    /// runtime nothing is auto-dismissed.
    pub fn notify(
        &self,
        message: impl Into<String>,
        level: NotificationLevel,
        timeout: Option<Duration>,
    ) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let timeout = timeout.unwrap_or_else(|| level.default_timeout());
        let notification = Notification {
            id,
            message: message.into(),
            level,
            timeout,
        };
        debug!(id, %level, "notify: {}", notification.message);
        self.queue.send_modify(|q| q.push(notification));

        if !timeout.is_zero() && !self.cancel.is_cancelled() {
            self.schedule_dismissal(id, timeout);
        }
        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationLevel::Success, None)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationLevel::Info, None)
    }

    pub fn warning(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationLevel::Warning, None)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationLevel::Error, None)
    }

    /// Remove a notification. Unknown ids are ignored.
    pub fn remove(&self, id: u64) {
        remove_from(&self.queue, id);
    }

    pub fn clear(&self) {
        self.queue.send_if_modified(|q| {
            let had_any = !q.is_empty();
            q.clear();
            had_any
        });
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.queue.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.queue.subscribe()
    }

    /// Cancel every pending dismissal. Queued notifications stay.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    fn schedule_dismissal(&self, id: u64, timeout: Duration) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(id, "no tokio runtime, notification will not auto-dismiss");
            return;
        };
        let queue = Arc::clone(&self.queue);
        let cancel = self.cancel.clone();
        runtime.spawn(async move {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {}
                () = tokio::time::sleep(timeout) => remove_from(&queue, id),
            }
        });
    }
}

fn remove_from(queue: &watch::Sender<Vec<Notification>>, id: u64) {
    queue.send_if_modified(|q| {
        let before = q.len();
        q.retain(|n| n.id != id);
        q.len() != before
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(center: &NotificationCenter) -> Vec<u64> {
        center.notifications().iter().map(|n| n.id).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn ids_increase_and_entries_expire() {
        let center = NotificationCenter::new();
        let a = center.success("Venda registrada");
        let b = center.error("Erro ao salvar");
        assert!(b > a);
        assert_eq!(ids(&center), vec![a, b]);

        tokio::time::sleep(Duration::from_millis(3001)).await;
        assert_eq!(ids(&center), vec![b]);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert!(center.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_timeout_is_sticky() {
        let center = NotificationCenter::new();
        let id = center.notify("Fixo", NotificationLevel::Info, Some(Duration::ZERO));
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(ids(&center), vec![id]);
        assert!(center.notifications()[0].is_sticky());

        center.remove(id);
        assert!(center.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_dismissals() {
        let center = NotificationCenter::new();
        let id = center.warning("Estoque baixo");
        center.shutdown();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ids(&center), vec![id]);
    }

    #[test]
    fn default_timeouts_per_level() {
        assert_eq!(
            NotificationLevel::Warning.default_timeout(),
            Duration::from_millis(4000)
        );
        assert_eq!(
            NotificationLevel::Error.default_timeout(),
            Duration::from_millis(5000)
        );
    }

    #[test]
    fn removing_unknown_id_is_a_no_op() {
        let center = NotificationCenter::new();
        let mut rx = center.subscribe();
        center.remove(42);
        assert!(!rx.has_changed().unwrap_or(true));
    }
}

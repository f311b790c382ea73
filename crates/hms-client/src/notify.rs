//! Transient user-facing notifications.
//!
//! The gateway reports every failure through a [`Notifier`]. A notification
//! may carry an `on_close` callback that must run exactly once when the
//! notification goes away, whether it timed out or the user dismissed it.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Runs once when a notification closes.
pub type OnClose = Box<dyn FnOnce() + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// What caused a notification to be raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A request failed; the message is the failure's message.
    RequestFailed,
    /// The backend rejected the session; closing it leads to the login page.
    SessionExpired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub level: NotificationLevel,
    pub message: String,
    pub duration: Duration,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Notification {
    pub fn error(kind: NotificationKind, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind,
            level: NotificationLevel::Error,
            message: message.into(),
            duration,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Point in time after which the notification closes by itself.
    pub fn expires_at(&self) -> OffsetDateTime {
        self.created_at + self.duration
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification, on_close: Option<OnClose>);
}

/// Emits notifications as tracing events and closes them after their
/// duration on the current tokio runtime.
///
/// Without a runtime the close callback runs immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification, on_close: Option<OnClose>) {
        match notification.level {
            NotificationLevel::Error => tracing::error!(
                kind = ?notification.kind,
                duration_ms = notification.duration.as_millis() as u64,
                "{}",
                notification.message
            ),
            NotificationLevel::Warning => tracing::warn!("{}", notification.message),
            NotificationLevel::Info | NotificationLevel::Success => {
                tracing::info!("{}", notification.message)
            }
        }

        let Some(on_close) = on_close else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let duration = notification.duration;
                handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    on_close();
                });
            }
            Err(_) => on_close(),
        }
    }
}

pub type NotificationId = u64;

struct Active {
    notification: Notification,
    on_close: Option<OnClose>,
}

/// In-process notification queue for hosts that render notifications
/// themselves.
///
/// Open notifications are kept until [`dismiss`](Self::dismiss) or
/// [`expire_due`](Self::expire_due) closes them. The most recent raised
/// notifications, up to the history limit, are kept in
/// [`history`](Self::history).
pub struct QueueNotifier {
    next_id: AtomicU64,
    active: DashMap<NotificationId, Active>,
    history: Mutex<VecDeque<Notification>>,
    history_limit: usize,
}

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

impl Default for QueueNotifier {
    fn default() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl QueueNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` entries in history; older ones are dropped first.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            next_id: AtomicU64::new(0),
            active: DashMap::new(),
            history: Mutex::new(VecDeque::new()),
            history_limit: limit,
        }
    }

    /// Open notifications, oldest first.
    pub fn active(&self) -> Vec<(NotificationId, Notification)> {
        let mut open: Vec<_> = self
            .active
            .iter()
            .map(|entry| (*entry.key(), entry.value().notification.clone()))
            .collect();
        open.sort_by_key(|(id, _)| *id);
        open
    }

    pub fn history(&self) -> Vec<Notification> {
        self.history
            .lock()
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Take the recorded history, leaving it empty.
    pub fn drain_history(&self) -> Vec<Notification> {
        self.history
            .lock()
            .map(|mut h| h.drain(..).collect())
            .unwrap_or_default()
    }

    /// Close one notification, running its callback. Returns false when the
    /// id is unknown or already closed.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        match self.active.remove(&id) {
            Some((_, active)) => {
                if let Some(on_close) = active.on_close {
                    on_close();
                }
                true
            }
            None => false,
        }
    }

    /// Close every open notification. Returns how many were closed.
    pub fn dismiss_all(&self) -> usize {
        let ids: Vec<NotificationId> = self.active().into_iter().map(|(id, _)| id).collect();
        ids.into_iter().filter(|id| self.dismiss(*id)).count()
    }

    /// Close the notifications whose duration has elapsed at `now`.
    pub fn expire_due(&self, now: OffsetDateTime) -> usize {
        let due: Vec<NotificationId> = self
            .active()
            .into_iter()
            .filter(|(_, n)| n.expires_at() <= now)
            .map(|(id, _)| id)
            .collect();
        due.into_iter().filter(|id| self.dismiss(*id)).count()
    }
}

impl Notifier for QueueNotifier {
    fn notify(&self, notification: Notification, on_close: Option<OnClose>) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut history) = self.history.lock() {
            if self.history_limit > 0 {
                while history.len() >= self.history_limit {
                    history.pop_front();
                }
                history.push_back(notification.clone());
            }
        }
        self.active.insert(
            id,
            Active {
                notification,
                on_close,
            },
        );
    }
}

impl std::fmt::Debug for QueueNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueNotifier")
            .field("active", &self.active.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    fn counter_callback(counter: &Arc<AtomicUsize>) -> OnClose {
        let counter = counter.clone();
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn dismiss_runs_callback_once() {
        let notifier = QueueNotifier::new();
        let closed = Arc::new(AtomicUsize::new(0));
        notifier.notify(
            Notification::error(NotificationKind::RequestFailed, "boom", Duration::from_secs(5)),
            Some(counter_callback(&closed)),
        );

        let (id, n) = notifier.active().pop().unwrap();
        assert_eq!(n.message, "boom");
        assert!(notifier.dismiss(id));
        assert!(!notifier.dismiss(id));
        assert_eq!(closed.load(Ordering::SeqCst), 1);
        assert!(notifier.active().is_empty());
        assert_eq!(notifier.history().len(), 1);
    }

    #[test]
    fn history_is_bounded_and_drainable() {
        let notifier = QueueNotifier::with_history_limit(2);
        for message in ["one", "two", "three"] {
            notifier.notify(
                Notification::error(NotificationKind::RequestFailed, message, Duration::from_secs(5)),
                None,
            );
        }

        let kept: Vec<_> = notifier.history().into_iter().map(|n| n.message).collect();
        assert_eq!(kept, vec!["two", "three"]);
        assert_eq!(notifier.active().len(), 3);

        assert_eq!(notifier.drain_history().len(), 2);
        assert!(notifier.history().is_empty());
    }

    #[test]
    fn expire_due_only_closes_elapsed() {
        let notifier = QueueNotifier::new();
        notifier.notify(
            Notification::error(NotificationKind::RequestFailed, "short", Duration::from_secs(1)),
            None,
        );
        notifier.notify(
            Notification::error(NotificationKind::RequestFailed, "long", Duration::from_secs(60)),
            None,
        );

        let later = OffsetDateTime::now_utc() + Duration::from_secs(5);
        assert_eq!(notifier.expire_due(later), 1);
        let open = notifier.active();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].1.message, "long");
    }

    #[test]
    fn log_notifier_without_runtime_closes_immediately() {
        let closed = Arc::new(AtomicUsize::new(0));
        LogNotifier.notify(
            Notification::error(NotificationKind::SessionExpired, "expired", Duration::from_secs(5)),
            Some(counter_callback(&closed)),
        );
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn log_notifier_closes_after_duration() {
        let closed = Arc::new(AtomicUsize::new(0));
        LogNotifier.notify(
            Notification::error(NotificationKind::SessionExpired, "expired", Duration::from_secs(5)),
            Some(counter_callback(&closed)),
        );
        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(closed.load(Ordering::SeqCst), 0);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }
}

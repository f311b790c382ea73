use std::sync::Arc;
use std::time::Duration;

use crate::error::GatewayError;
use crate::navigation::Navigator;
use crate::notify::{Notification, NotificationKind, Notifier};
use crate::session::Session;

pub const SESSION_EXPIRED_MESSAGE: &str = "登录已过期，请重新登录";

/// User-visible side of a failed call: notifications and the
/// expired-session redirect.
pub struct EffectHandler {
    notifier: Arc<dyn Notifier>,
    session: Arc<Session>,
    navigator: Option<Arc<dyn Navigator>>,
    duration: Duration,
    login_path: String,
}

impl EffectHandler {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        session: Arc<Session>,
        navigator: Option<Arc<dyn Navigator>>,
        duration: Duration,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            notifier,
            session,
            navigator,
            duration,
            login_path: login_path.into(),
        }
    }

    /// Raise the failure notification, plus the session-expired one when
    /// `session_expired` is set. Closing the latter clears the stored token
    /// and navigates to the login route.
    pub fn apply(&self, error: &GatewayError, session_expired: bool) {
        if !error.is_notified() {
            return;
        }

        self.notifier.notify(
            Notification::error(NotificationKind::RequestFailed, error.to_string(), self.duration),
            None,
        );

        if !session_expired {
            return;
        }

        self.session.mark_expired();
        let session = self.session.clone();
        let navigator = self.navigator.clone();
        let login_path = self.login_path.clone();
        self.notifier.notify(
            Notification::error(
                NotificationKind::SessionExpired,
                SESSION_EXPIRED_MESSAGE,
                self.duration,
            ),
            Some(Box::new(move || {
                if let Err(e) = session.clear() {
                    tracing::error!(error = %e, "failed to clear expired session token");
                }
                match navigator {
                    Some(nav) => nav.navigate(&login_path),
                    None => tracing::warn!(path = %login_path, "no navigator wired; redirect skipped"),
                }
            })),
        );
    }
}

impl std::fmt::Debug for EffectHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandler")
            .field("duration", &self.duration)
            .field("login_path", &self.login_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;
    use crate::notify::QueueNotifier;
    use crate::session::SessionState;

    struct Fixture {
        notifier: Arc<QueueNotifier>,
        navigator: Arc<RecordingNavigator>,
        session: Arc<Session>,
        handler: EffectHandler,
    }

    fn fixture() -> Fixture {
        let notifier = Arc::new(QueueNotifier::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let session = Arc::new(Session::in_memory());
        session.login("tok").unwrap();
        let handler = EffectHandler::new(
            notifier.clone(),
            session.clone(),
            Some(navigator.clone() as Arc<dyn Navigator>),
            Duration::from_secs(5),
            "/login",
        );
        Fixture {
            notifier,
            navigator,
            session,
            handler,
        }
    }

    #[test]
    fn plain_failure_raises_one_notification() {
        let f = fixture();
        f.handler
            .apply(&GatewayError::rejected(Some(400), "缺少必填字段"), false);

        let history = f.notifier.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].message, "缺少必填字段");
        assert_eq!(history[0].kind, NotificationKind::RequestFailed);
        assert_eq!(history[0].duration, Duration::from_secs(5));
        assert_eq!(f.session.state(), SessionState::Authenticated);
    }

    #[test]
    fn expiry_redirects_only_after_dismissal() {
        let f = fixture();
        f.handler
            .apply(&GatewayError::rejected(Some(401), "token expired"), true);

        let open = f.notifier.active();
        assert_eq!(open.len(), 2);
        assert_eq!(open[1].1.kind, NotificationKind::SessionExpired);
        assert_eq!(open[1].1.message, SESSION_EXPIRED_MESSAGE);
        assert_eq!(f.session.state(), SessionState::Expired);
        assert!(f.navigator.visited().is_empty());

        f.notifier.dismiss(open[1].0);
        assert_eq!(f.session.state(), SessionState::Anonymous);
        assert_eq!(f.navigator.visited(), vec!["/login"]);

        f.notifier.dismiss_all();
        assert_eq!(f.navigator.visited().len(), 1);
    }

    #[test]
    fn local_errors_are_not_notified() {
        let f = fixture();
        let err = serde_json::from_str::<u8>("x").unwrap_err();
        f.handler.apply(&GatewayError::Decode(err), false);
        assert!(f.notifier.history().is_empty());
    }
}

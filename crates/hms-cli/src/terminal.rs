//! Gateway services for a one-shot terminal session.

use std::sync::Arc;

use colored::Colorize;
use hms_client::notify::OnClose;
use hms_client::{Notification, Notifier, Router};

use crate::output::print_notification;

/// Prints each notification to stderr and closes it right away, so a
/// pending session-expiry redirect happens before the command exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification, on_close: Option<OnClose>) {
        print_notification(&notification);
        if let Some(on_close) = on_close {
            on_close();
        }
    }
}

/// Console router that reports every navigation on stderr.
pub fn reporting_router() -> Arc<Router> {
    let router = Arc::new(Router::console());
    router.after_each(|route| {
        eprintln!(
            "{} {} ({})",
            "→".cyan(),
            route.path.cyan(),
            route.document_title()
        );
    });
    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use hms_client::NotificationKind;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[test]
    fn close_callback_runs_immediately() {
        let closed = Arc::new(AtomicBool::new(false));
        let flag = closed.clone();
        TerminalNotifier.notify(
            Notification::error(
                NotificationKind::SessionExpired,
                "登录已过期，请重新登录",
                Duration::from_secs(5),
            ),
            Some(Box::new(move || flag.store(true, Ordering::SeqCst))),
        );
        assert!(closed.load(Ordering::SeqCst));
    }
}

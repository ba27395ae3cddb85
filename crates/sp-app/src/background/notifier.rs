use std::sync::Arc;

use sp_core::ports::NotificationPort;
use sp_core::Notification;
use tracing::warn;

use super::error::MessagingError;

/// Best-effort user notifications. Delivery failures are logged, never raised.
#[derive(Clone)]
pub struct UserNotifier {
    port: Arc<dyn NotificationPort>,
}

impl UserNotifier {
    pub fn new(port: Arc<dyn NotificationPort>) -> Self {
        Self { port }
    }

    pub async fn notify(&self, notification: Notification) {
        if let Err(e) = self.port.notify(notification).await {
            warn!(error = %e, "failed to show notification");
        }
    }

    pub async fn success(&self, message: impl Into<String>) {
        self.notify(Notification::success(message)).await;
    }

    pub async fn info(&self, message: impl Into<String>) {
        self.notify(Notification::info(message)).await;
    }

    pub async fn error(&self, message: impl Into<String>) {
        self.notify(Notification::error(message)).await;
    }

    pub async fn messaging_failure(&self, err: &MessagingError) {
        self.error(describe_messaging_failure(err)).await;
    }
}

/// User-facing text for a failure to reach the page.
pub fn describe_messaging_failure(err: &MessagingError) -> String {
    match err {
        MessagingError::NoActiveTab => "No active tab to paste into.".to_string(),
        MessagingError::UnsupportedTab { .. } => {
            "ShortcutPaste cannot run on this page. Browser and extension pages are not supported."
                .to_string()
        }
        MessagingError::Injection(_) => {
            "Could not load ShortcutPaste into this page. Please refresh the page and try again."
                .to_string()
        }
        MessagingError::Delivery(reason) | MessagingError::Host(reason) => {
            describe_delivery_failure(reason)
        }
    }
}

fn describe_delivery_failure(reason: &str) -> String {
    if reason.contains("Could not establish connection") {
        "ShortcutPaste is not loaded on this page yet. Please refresh the page and try again."
            .to_string()
    } else if reason.contains("Extension context invalidated") {
        "ShortcutPaste was updated. Please refresh the page to continue.".to_string()
    } else if reason.contains("No tab with id") {
        "The tab was closed before the content could be pasted.".to_string()
    } else {
        format!("Failed to paste: {reason}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_failures_are_tailored() {
        let refresh = describe_messaging_failure(&MessagingError::Delivery(
            "Could not establish connection. Receiving end does not exist.".into(),
        ));
        assert!(refresh.contains("refresh the page"));

        let reloaded = describe_messaging_failure(&MessagingError::Delivery(
            "Extension context invalidated.".into(),
        ));
        assert!(reloaded.contains("was updated"));

        let closed = describe_messaging_failure(&MessagingError::Host("No tab with id: 9.".into()));
        assert!(closed.contains("tab was closed"));

        let other = describe_messaging_failure(&MessagingError::Delivery("boom".into()));
        assert_eq!(other, "Failed to paste: boom");
    }
}

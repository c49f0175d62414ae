//! Transient user-facing notifications ("toasts").
//!
//! The workflow and the session observer publish short messages here; the
//! presentation layer decides how to show them. Nobody listening is fine.

use tokio::sync::broadcast;

pub const VERIFY_SUCCEEDED: &str = "Content verified and registered successfully!";
pub const VERIFY_FAILED: &str = "Failed to verify content";
pub const SIGN_IN_FAILED: &str = "Failed to sign in";
pub const SIGN_OUT_SUCCEEDED: &str = "Signed out successfully";
pub const SIGN_OUT_FAILED: &str = "Failed to sign out";

const DEFAULT_CAPACITY: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Fan-out publisher for notifications.
#[derive(Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(NotificationLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(NotificationLevel::Error, message.into());
    }

    fn publish(&self, level: NotificationLevel, message: String) {
        // Err only means there are no subscribers right now.
        let _ = self.tx.send(Notification { level, message });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_in_order() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        notifier.success(VERIFY_SUCCEEDED);
        notifier.error(VERIFY_FAILED);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.level, NotificationLevel::Success);
        assert_eq!(first.message, VERIFY_SUCCEEDED);
        assert_eq!(rx.recv().await.unwrap().level, NotificationLevel::Error);
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        Notifier::new().error("nobody is listening");
    }
}

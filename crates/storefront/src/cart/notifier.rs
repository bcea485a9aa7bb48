//! Delivery of cart notifications.

use std::sync::{Mutex, PoisonError};

use tasty_eats_core::{Notification, NotificationLevel};

/// Receives the user-facing messages produced by cart operations.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Writes each notification to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        let level = match notification.level {
            NotificationLevel::Success => "success",
            NotificationLevel::Info => "info",
        };
        tracing::info!(level, message = %notification.message, "Notification");
    }
}

/// Keeps every notification in order, for inspection in tests and by callers
/// that forward them elsewhere.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far.
    #[must_use]
    pub fn all(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages received so far, without their level.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.all().into_iter().map(|n| n.message).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}

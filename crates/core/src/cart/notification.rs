//! User-facing messages announced after cart changes.

use serde::{Deserialize, Serialize};

use super::CartEvent;

/// Severity of a notification. The cart never reports errors through this channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
}

/// A short message intended for transient display (a toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}

impl CartEvent {
    /// The message to announce for this event, if any.
    ///
    /// Setting an absolute quantity is silent.
    #[must_use]
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::Added { name, .. } => {
                Some(Notification::success(format!("Added {name} to your cart")))
            }
            Self::AddedAnother { name, .. } => Some(Notification::success(format!(
                "Added another {name} to your cart"
            ))),
            Self::Removed { name, .. } => {
                Some(Notification::info(format!("Removed {name} from your cart")))
            }
            Self::Cleared => Some(Notification::info("Cart cleared")),
            Self::QuantityChanged { .. } => None,
        }
    }
}

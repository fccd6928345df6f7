//! User-facing notifications for lifecycle events
//!
//! A [`NotificationSink`] receives one [`Notification`] per lifecycle event.
//! Delivery is fire-and-forget: sinks log failures and never report them back
//! to the monitor.

mod command;

pub use command::CommandSink;

use async_trait::async_trait;

use crate::models::{LifecycleEvent, Severity};

/// A rendered notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Urgency
    pub severity: Severity,
    /// Title line
    pub title: String,
    /// Body text
    pub message: String,
}

impl Notification {
    /// Renders the notification for `event` on the connection `name`/`address`
    #[must_use]
    pub fn for_event(event: LifecycleEvent, title: &str, name: &str, address: &str) -> Self {
        let target = format!("{name} - {address}");
        let message = match event {
            LifecycleEvent::Connecting => format!("🔄 Connecting to {target}..."),
            LifecycleEvent::Successful => format!("✅ Connected to {target}"),
            LifecycleEvent::Closed => format!("🔌 Connection {target} was closed normally"),
            LifecycleEvent::Failed => format!("❌ Failed to connect to {target}"),
            LifecycleEvent::Lost => format!("🚫 Connection {target} lost"),
            LifecycleEvent::LaunchError => {
                format!("❌ Connection process was not started {target}")
            }
        };

        Self {
            severity: event.severity(),
            title: title.to_string(),
            message,
        }
    }
}

/// Receives notifications; must tolerate concurrent calls
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers a notification
    async fn notify(&self, notification: Notification);
}

/// Sink that only writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[async_trait]
impl NotificationSink for TracingSink {
    async fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Normal => {
                tracing::info!(title = %notification.title, "{}", notification.message);
            }
            Severity::Critical => {
                tracing::warn!(title = %notification.title, "{}", notification.message);
            }
        }
    }
}

/// Escapes text for notification daemons that interpret backslashes
#[must_use]
pub fn escape_backslashes(text: &str) -> String {
    text.replace('\\', "\\\\")
}

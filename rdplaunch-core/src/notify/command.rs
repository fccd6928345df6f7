//! Notifications through an external notifier such as `dunstify`

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::NotificationSettings;

use super::{Notification, NotificationSink, escape_backslashes};

/// Runs `<program> -u <urgency> <title> <message>` for each notification
///
/// Works with both `dunstify` and `notify-send`.
#[derive(Debug, Clone)]
pub struct CommandSink {
    program: String,
}

impl CommandSink {
    /// Creates a sink calling `program`
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Creates a sink from notification settings
    #[must_use]
    pub fn from_settings(settings: &NotificationSettings) -> Self {
        Self::new(settings.program.clone())
    }

    /// Returns the argument list for a notification
    #[must_use]
    pub fn args_for(notification: &Notification) -> Vec<String> {
        vec![
            "-u".to_string(),
            notification.severity.as_str().to_string(),
            notification.title.clone(),
            escape_backslashes(&notification.message),
        ]
    }
}

#[async_trait]
impl NotificationSink for CommandSink {
    async fn notify(&self, notification: Notification) {
        let result = Command::new(&self.program)
            .args(Self::args_for(&notification))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match result {
            Ok(status) if status.success() => {}
            Ok(status) => {
                tracing::warn!(
                    program = %self.program,
                    code = ?status.code(),
                    "Notifier exited with failure"
                );
            }
            Err(e) => {
                tracing::warn!(program = %self.program, error = %e, "Failed to run notifier");
            }
        }
    }
}

//! Lifecycle events emitted for a launched client process

use std::fmt;

/// Urgency of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Informational
    Normal,
    /// Needs the user's attention
    Critical,
}

impl Severity {
    /// Returns the urgency name understood by `notify-send` and `dunstify`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observable step in the life of a launched client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// The client process was started
    Connecting,
    /// The client was still alive after the grace period.
    ///
    /// This is a heuristic: the remote handshake is never observed, so a
    /// terminal event may still follow with any classification.
    Successful,
    /// The client exited normally
    Closed,
    /// The client could not connect or exited with an unknown code
    Failed,
    /// The session dropped
    Lost,
    /// The client process could not be started at all
    LaunchError,
}

impl LifecycleEvent {
    /// Returns true if this event ends the lifecycle of a process
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Closed | Self::Failed | Self::Lost | Self::LaunchError
        )
    }

    /// Returns the notification urgency for this event
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::Connecting | Self::Successful | Self::Closed => Severity::Normal,
            Self::Failed | Self::Lost | Self::LaunchError => Severity::Critical,
        }
    }

    /// Returns the kebab-case event name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Successful => "successful",
            Self::Closed => "closed",
            Self::Failed => "failed",
            Self::Lost => "lost",
            Self::LaunchError => "launch-error",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

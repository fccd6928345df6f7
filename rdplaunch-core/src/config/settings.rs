//! Application settings model

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default location of the profile store
pub const DEFAULT_PROFILES_PATH: &str = "~/.config/rdp_connector.json";

/// Default remote desktop client binary
pub const DEFAULT_CLIENT_PROGRAM: &str = "xfreerdp3";

/// Default grace period before a running client is reported as connected
pub const DEFAULT_GRACE_PERIOD_SECS: u64 = 2;

/// Default notification title
pub const DEFAULT_NOTIFICATION_TITLE: &str = "RDP Connector";

/// Top-level settings, stored as `config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Profile store settings
    pub profiles: ProfileSettings,
    /// Remote desktop client settings
    pub client: ClientSettings,
    /// Lifecycle monitor settings
    pub monitor: MonitorSettings,
    /// Notification settings
    pub notifications: NotificationSettings,
    /// Menu tool settings
    pub menu: MenuSettings,
}

/// Where connection profiles are read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    /// Path of the JSON profile list. `~` is expanded; relative paths are
    /// resolved against the configuration directory.
    pub path: String,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            path: DEFAULT_PROFILES_PATH.to_string(),
        }
    }
}

impl ProfileSettings {
    /// Returns the expanded profile store path
    #[must_use]
    pub fn resolve_path(&self, config_dir: &Path) -> PathBuf {
        let expanded = PathBuf::from(shellexpand::tilde(&self.path).as_ref());
        if expanded.is_absolute() {
            expanded
        } else {
            config_dir.join(expanded)
        }
    }
}

/// Remote desktop client invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Client binary name or path
    pub program: String,
    /// Arguments used when a connection has no extra parameters
    pub default_args: Vec<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_CLIENT_PROGRAM.to_string(),
            default_args: vec!["/dynamic-resolution".to_string(), "+clipboard".to_string()],
        }
    }
}

/// Lifecycle monitor timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Seconds to wait before reporting a still-running client as connected
    pub grace_period_secs: u64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            grace_period_secs: DEFAULT_GRACE_PERIOD_SECS,
        }
    }
}

impl MonitorSettings {
    /// Returns the grace period as a `Duration`
    #[must_use]
    pub const fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_secs)
    }
}

/// Desktop notification delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Whether desktop notifications are sent at all
    pub enabled: bool,
    /// Notifier program, called as `<program> -u <urgency> <title> <message>`
    pub program: String,
    /// Notification title
    pub title: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "dunstify".to_string(),
            title: DEFAULT_NOTIFICATION_TITLE.to_string(),
        }
    }
}

/// dmenu-style menu program used for picking and prompting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    /// Menu program (rofi-compatible command line)
    pub program: String,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            program: "rofi".to_string(),
        }
    }
}

//! Loading and saving `config.toml`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

use super::settings::Settings;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "RDPLAUNCH_CONFIG_DIR";

const SETTINGS_FILE: &str = "config.toml";

/// Locates and reads the `rdplaunch` configuration directory
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the default configuration directory
    ///
    /// `$RDPLAUNCH_CONFIG_DIR` wins over `$XDG_CONFIG_HOME/rdplaunch`.
    ///
    /// # Errors
    /// Returns `ConfigError::NoConfigDir` if no home configuration directory
    /// can be determined.
    pub fn new() -> ConfigResult<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(Self::with_config_dir(PathBuf::from(dir)));
        }

        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("rdplaunch");
        Ok(Self::with_config_dir(config_dir))
    }

    /// Creates a manager for an explicit configuration directory
    #[must_use]
    pub const fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Returns the configuration directory
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the path of `config.toml`
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Loads settings, falling back to defaults when the file is missing
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_settings(&self) -> ConfigResult<Settings> {
        let path = self.settings_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path,
            reason: e.to_string(),
        })
    }

    /// Writes settings to `config.toml`, creating the directory if needed
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save_settings(&self, settings: &Settings) -> ConfigResult<()> {
        std::fs::create_dir_all(&self.config_dir).map_err(|e| {
            ConfigError::Write(format!(
                "Failed to create config directory '{}': {e}",
                self.config_dir.display()
            ))
        })?;

        let content =
            toml::to_string_pretty(settings).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        let path = self.settings_path();
        std::fs::write(&path, content)
            .map_err(|e| ConfigError::Write(format!("{}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), "Settings saved");
        Ok(())
    }

    /// Returns the profile store path configured in `settings`
    #[must_use]
    pub fn profiles_path(&self, settings: &Settings) -> PathBuf {
        settings.profiles.resolve_path(&self.config_dir)
    }
}

//! Shared utility functions used across command modules.

use std::path::Path;

use rdplaunch_core::config::{ConfigManager, Settings};
use rdplaunch_core::profile::JsonProfileStore;

use crate::error::CliError;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Loads settings and the profile store they point at
pub fn load_context(
    config_path: Option<&Path>,
) -> Result<(ConfigManager, Settings, JsonProfileStore), CliError> {
    let manager = create_config_manager(config_path)?;
    let settings = manager
        .load_settings()
        .map_err(|e| CliError::Config(format!("Failed to load settings: {e}")))?;
    let store = JsonProfileStore::new(manager.profiles_path(&settings));
    Ok((manager, settings, store))
}

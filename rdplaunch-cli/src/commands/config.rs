//! Settings file commands.

use std::path::Path;

use rdplaunch_core::config::Settings;

use crate::cli::ConfigCommands;
use crate::error::CliError;
use crate::util::{create_config_manager, load_context};

/// Config command handler
pub fn cmd_config(config_path: Option<&Path>, subcmd: ConfigCommands) -> Result<(), CliError> {
    match subcmd {
        ConfigCommands::Init { force } => cmd_init(config_path, force),
        ConfigCommands::Show => cmd_show(config_path),
    }
}

fn cmd_init(config_path: Option<&Path>, force: bool) -> Result<(), CliError> {
    let manager = create_config_manager(config_path)?;
    let path = manager.settings_path();

    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "'{}' already exists; use --force to overwrite",
            path.display()
        )));
    }

    manager.save_settings(&Settings::default())?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}

fn cmd_show(config_path: Option<&Path>) -> Result<(), CliError> {
    let (manager, settings, store) = load_context(config_path)?;

    let rendered = toml::to_string_pretty(&settings)
        .map_err(|e| CliError::Config(format!("Failed to render settings: {e}")))?;

    println!("# {}", manager.settings_path().display());
    println!("# profiles: {}", store.path().display());
    print!("{rendered}");
    Ok(())
}

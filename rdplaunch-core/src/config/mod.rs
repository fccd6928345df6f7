//! Configuration management for `rdplaunch`
//!
//! This module provides the `ConfigManager` for loading and saving
//! settings in TOML format.

mod manager;
pub mod settings;

pub use manager::{CONFIG_DIR_ENV, ConfigManager};
pub use settings::{
    ClientSettings, MenuSettings, MonitorSettings, NotificationSettings, ProfileSettings, Settings,
};

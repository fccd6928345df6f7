//! `rdplaunch` Core Library
//!
//! Launches a remote desktop client for a saved or ad-hoc connection profile
//! and follows the client process until it exits.
//!
//! # Crate Structure
//!
//! - [`models`] - Profiles, resolved connections, lifecycle events
//! - [`config`] - Settings and their persistence
//! - [`profile`] - Profile store and connection selection
//! - [`menu`] - Picker and prompter collaborators (rofi)
//! - [`credentials`] - Interactive resolution of missing fields
//! - [`protocol`] - `FreeRDP` command building
//! - [`session`] - Process launch and lifecycle monitoring
//! - [`notify`] - Notification sinks
//! - [`pipeline`] - The end-to-end launch flow

#![warn(missing_docs)]

pub mod config;
pub mod credentials;
pub mod error;
pub mod menu;
pub mod models;
pub mod notify;
pub mod pipeline;
pub mod profile;
pub mod protocol;
pub mod session;
pub mod tracing;

pub use config::{ConfigManager, Settings};
pub use credentials::{CredentialResolver, Resolution};
pub use error::{ConfigError, LaunchError, PromptError};
pub use models::{
    ConnectionProfile, FREE_FORM_NAME, LifecycleEvent, ProfileField, ResolvedConnection, Severity,
};
pub use notify::{CommandSink, Notification, NotificationSink, TracingSink};
pub use pipeline::{CancelReason, Launcher, PipelineOutcome, Preparation};
pub use profile::{ConnectionSelector, JsonProfileStore, ProfileStore};
pub use session::{
    LaunchedProcess, LifecycleMonitor, MonitorHandle, MonitorReport, ProcessLauncher,
    classify_exit_code,
};

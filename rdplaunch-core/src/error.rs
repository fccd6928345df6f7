//! Error types for `rdplaunch`
//!
//! Errors are split by the boundary they come from. User cancellation is not
//! an error at all: it is reported through
//! [`PipelineOutcome::Cancelled`](crate::pipeline::PipelineOutcome).

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading profiles or settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file does not exist
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read
    #[error("Failed to read {}: {reason}", path.display())]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O message
        reason: String,
    },

    /// Failed to parse file contents
    #[error("Failed to parse {}: {reason}", path.display())]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Two stored profiles share one display name
    #[error("Duplicate connection name '{0}' in profile store")]
    DuplicateName(String),

    /// A stored profile uses the reserved free-form name
    #[error("Connection name '{0}' is reserved for free-form connections")]
    ReservedName(String),

    /// A profile has no display name
    #[error("Connection at position {0} has an empty name")]
    EmptyName(usize),

    /// Failed to serialize settings
    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    /// Failed to write settings
    #[error("Failed to write configuration: {0}")]
    Write(String),

    /// No configuration directory could be determined
    #[error("Could not determine configuration directory")]
    NoConfigDir,
}

/// Errors raised by an external menu tool (picker or prompter)
///
/// These describe the tool failing to run, not the user dismissing it.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The menu program could not be spawned
    #[error("Failed to run menu program '{program}': {reason}")]
    Spawn {
        /// Program name
        program: String,
        /// OS error message
        reason: String,
    },

    /// Reading interactive input failed
    #[error("Failed to read input: {0}")]
    Input(String),
}

/// Errors raised while starting the remote desktop client
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The operating system refused to start the process
    #[error("Failed to start '{program}': {reason}")]
    Spawn {
        /// Client program
        program: String,
        /// OS error message
        reason: String,
    },

    /// The password could not be handed to the client
    #[error("Failed to pass credentials to '{program}': {reason}")]
    Credentials {
        /// Client program
        program: String,
        /// I/O error message
        reason: String,
    },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for launch operations
pub type LaunchResult<T> = Result<T, LaunchError>;

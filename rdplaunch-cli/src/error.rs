//! CLI error types and exit codes.

use rdplaunch_core::error::{ConfigError, LaunchError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, I/O, or other non-connection errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Connection failure - unknown profile, client not started, or session
    /// ended in failure
    pub const CONNECTION_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Named profile does not exist
    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    /// Client could not be started
    #[error("Launch error: {0}")]
    Launch(String),

    /// Session ended with a failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<LaunchError> for CliError {
    fn from(err: LaunchError) -> Self {
        Self::Launch(err.to_string())
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success, including a cancelled selection
    /// - 1: General error (configuration, IO)
    /// - 2: Connection failure (unknown profile, launch error, failed session)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionNotFound(_) | Self::Launch(_) | Self::Connection(_) => {
                exit_codes::CONNECTION_FAILURE
            }
            Self::Config(_) | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}

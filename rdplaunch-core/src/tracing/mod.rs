//! Structured logging setup
//!
//! Logs go to stderr unless a log file is configured, so stdout stays clean
//! for `--dry-run` and `list` output. The spans opened by the launch pipeline
//! are named by [`span_names`]. Passwords are never recorded as fields.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable whose `EnvFilter` directives replace the level
pub const LOG_FILTER_ENV: &str = "RDPLAUNCH_LOG";

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum TracingError {
    /// The filter directives did not parse
    #[error("Invalid log filter '{directives}': {reason}")]
    Filter {
        /// Directives as given
        directives: String,
        /// Parser message
        reason: String,
    },

    /// The log file could not be created
    #[error("Failed to create log file {}: {reason}", path.display())]
    LogFile {
        /// Requested log file
        path: PathBuf,
        /// I/O error message
        reason: String,
    },

    /// A global subscriber was already installed
    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

/// Result type for tracing setup
pub type TracingResult<T> = Result<T, TracingError>;

/// Verbosity of `rdplaunch` log targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TracingLevel {
    /// Errors only (`--quiet`)
    Error,
    /// Errors and warnings
    #[default]
    Warn,
    /// Pipeline milestones (`-v`)
    Info,
    /// Lifecycle events and masked command lines (`-vv`)
    Debug,
    /// Everything (`-vvv`)
    Trace,
}

impl TracingLevel {
    /// Maps a `-v` count to a level
    #[must_use]
    pub const fn from_verbosity(verbose: u8) -> Self {
        match verbose {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Returns the `EnvFilter` spelling of the level
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where log records are written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TracingOutput {
    /// Standard error, with ANSI colors
    #[default]
    Stderr,
    /// A plain-text file, truncated on start
    File(PathBuf),
}

/// Logging configuration assembled from command-line flags
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Level for `rdplaunch` targets; other crates log warnings only
    pub level: TracingLevel,
    /// Destination
    pub output: TracingOutput,
    /// Raw `EnvFilter` directives; replaces `level` when set
    pub filter: Option<String>,
}

impl TracingConfig {
    /// Creates a configuration logging warnings to stderr
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level
    #[must_use]
    pub const fn with_level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the destination
    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    /// Replaces the level with explicit filter directives
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Applies directives from [`LOG_FILTER_ENV`] when it is set and not blank
    #[must_use]
    pub fn with_env_filter(self) -> Self {
        match std::env::var(LOG_FILTER_ENV) {
            Ok(directives) if !directives.trim().is_empty() => self.with_filter(directives),
            _ => self,
        }
    }

    /// Returns the directives this configuration installs
    #[must_use]
    pub fn filter_directives(&self) -> String {
        match &self.filter {
            Some(directives) => directives.clone(),
            None => format!(
                "warn,rdplaunch={level},rdplaunch_core={level}",
                level = self.level
            ),
        }
    }
}

/// Installs the global subscriber
///
/// # Errors
///
/// Returns an error if the filter is invalid, the log file cannot be
/// created, or a subscriber is already installed.
pub fn init_tracing(config: &TracingConfig) -> TracingResult<()> {
    let directives = config.filter_directives();
    let filter = EnvFilter::try_new(&directives).map_err(|e| TracingError::Filter {
        directives: directives.clone(),
        reason: e.to_string(),
    })?;

    let installed = match &config.output {
        TracingOutput::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        TracingOutput::File(path) => {
            let file = File::create(path).map_err(|e| TracingError::LogFile {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
    };
    installed.map_err(|e| TracingError::Install(e.to_string()))?;

    tracing::debug!(filter = %directives, output = ?config.output, "Tracing initialized");
    Ok(())
}

/// Names of the spans opened along the launch pipeline
pub mod span_names {
    /// Loading the profile store
    pub const CONFIG_LOAD: &str = "config.load";
    /// Picking a profile
    pub const CONNECTION_SELECT: &str = "connection.select";
    /// Prompting for missing fields
    pub const CREDENTIAL_RESOLVE: &str = "credential.resolve";
    /// Spawning the client
    pub const SESSION_START: &str = "session.start";
    /// Following the client until it exits
    pub const SESSION_MONITOR: &str = "session.monitor";
}

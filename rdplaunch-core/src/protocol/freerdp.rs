//! `FreeRDP` command builder
//!
//! Builds the `xfreerdp3` command line for a resolved connection. The
//! password never appears in the argument list: `/from-stdin` is passed and
//! the launcher writes the password to the client's standard input.

use secrecy::{ExposeSecret, SecretString};

use crate::config::ClientSettings;
use crate::models::ResolvedConnection;

/// Flag telling `FreeRDP` to read missing credentials from stdin
pub const FROM_STDIN_FLAG: &str = "/from-stdin";

/// Configuration for one `FreeRDP` invocation
#[derive(Debug, Clone)]
pub struct FreeRdpConfig {
    /// Target address, optionally with `:port`
    pub address: String,
    /// Username for authentication
    pub username: Option<String>,
    /// Password for authentication
    pub password: Option<SecretString>,
    /// Arguments taken from the connection's extra parameters
    pub extra_args: Vec<String>,
    /// Arguments used when `extra_args` is empty
    pub default_args: Vec<String>,
}

impl FreeRdpConfig {
    /// Builds the configuration for a resolved connection
    #[must_use]
    pub fn from_resolved(connection: &ResolvedConnection, client: &ClientSettings) -> Self {
        Self {
            address: connection.address.clone(),
            username: Some(connection.username.clone()),
            password: Some(connection.password.clone()),
            extra_args: connection.param_args(),
            default_args: client.default_args.clone(),
        }
    }

    /// Returns true if a non-empty password will be sent on stdin
    #[must_use]
    pub fn sends_password(&self) -> bool {
        self.password
            .as_ref()
            .is_some_and(|p| !p.expose_secret().is_empty())
    }
}

/// Builds `FreeRDP` command-line arguments from configuration
///
/// Layout: `/u:<user>`, `/from-stdin` when a password is set, the extra
/// arguments (or the default arguments when there are none), and finally
/// `/v:<address>`.
#[must_use]
pub fn build_freerdp_args(config: &FreeRdpConfig) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(ref username) = config.username {
        args.push(format!("/u:{username}"));
    }

    if config.sends_password() {
        args.push(FROM_STDIN_FLAG.to_string());
    }

    let options = if config.extra_args.is_empty() {
        &config.default_args
    } else {
        &config.extra_args
    };
    args.extend(options.iter().cloned());

    // Server address (must be last)
    args.push(format!("/v:{}", config.address));

    args
}

/// A fully built client invocation
#[derive(Debug, Clone)]
pub struct LaunchCommand {
    /// Client program
    pub program: String,
    /// Command-line arguments
    pub args: Vec<String>,
    /// Secret written to the client's stdin after spawn
    pub stdin_secret: Option<SecretString>,
}

impl LaunchCommand {
    /// Creates a command without stdin input
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            stdin_secret: None,
        }
    }

    /// Builds the `FreeRDP` command for a resolved connection
    #[must_use]
    pub fn freerdp(connection: &ResolvedConnection, client: &ClientSettings) -> Self {
        let config = FreeRdpConfig::from_resolved(connection, client);
        let args = build_freerdp_args(&config);
        let stdin_secret = config
            .sends_password()
            .then_some(config.password)
            .flatten();
        Self {
            program: client.program.clone(),
            args,
            stdin_secret,
        }
    }

    /// Formats the command for display with sensitive arguments masked
    #[must_use]
    pub fn display_masked(&self) -> String {
        let masked: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if is_sensitive_arg(arg) {
                    mask_arg(arg)
                } else {
                    arg.clone()
                }
            })
            .collect();

        if masked.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, masked.join(" "))
        }
    }
}

/// Returns true if the argument carries a secret that must not be shown
fn is_sensitive_arg(arg: &str) -> bool {
    let lower = arg.to_lowercase();
    lower.starts_with("/p:")
        || lower.starts_with("/gp:")
        || lower.contains("password=")
        || lower.contains("secret=")
        || lower.contains("token=")
}

/// Masks the value portion of a sensitive argument, preserving the key
fn mask_arg(arg: &str) -> String {
    for sep in [':', '='] {
        if let Some(pos) = arg.find(sep) {
            return format!("{}****", &arg[..=pos]);
        }
    }
    "****".to_string()
}

//! Starting the remote desktop client

use std::io::ErrorKind;
use std::process::Stdio;

use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::ClientSettings;
use crate::error::{LaunchError, LaunchResult};
use crate::models::ResolvedConnection;
use crate::protocol::LaunchCommand;
use crate::tracing::span_names;

/// Handle to one running client process
///
/// Holds the display name and address for notifications. The password is
/// not kept once it has been written to the client.
#[derive(Debug)]
pub struct LaunchedProcess {
    session_id: Uuid,
    pid: Option<u32>,
    name: String,
    address: String,
    started_at: DateTime<Utc>,
    pub(super) child: Child,
}

impl LaunchedProcess {
    /// Unique id of this launch, used in log records
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// OS process id, if the process had not exited when it was queried
    #[must_use]
    pub const fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Display name of the connection
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target address of the connection
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Time the process was spawned
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

/// Builds client command lines and starts them without waiting
#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher {
    client: ClientSettings,
}

impl ProcessLauncher {
    /// Creates a launcher for the given client settings
    #[must_use]
    pub const fn new(client: ClientSettings) -> Self {
        Self { client }
    }

    /// Returns the command that would be run for `connection`
    #[must_use]
    pub fn command_for(&self, connection: &ResolvedConnection) -> LaunchCommand {
        LaunchCommand::freerdp(connection, &self.client)
    }

    /// Starts the client for `connection`
    ///
    /// Returns as soon as the OS has accepted the spawn and the password has
    /// been handed over. Consumes the connection so the password is dropped
    /// here.
    ///
    /// # Errors
    /// Returns `LaunchError` if the process cannot be started or the
    /// password cannot be written to it.
    pub async fn launch(&self, connection: ResolvedConnection) -> LaunchResult<LaunchedProcess> {
        let command = self.command_for(&connection);
        spawn_command(command, connection.name, connection.address).await
    }
}

/// Spawns `command` and wraps it in a [`LaunchedProcess`]
///
/// Must be called from within a tokio runtime.
///
/// # Errors
/// Returns `LaunchError` if the process cannot be started or the stdin
/// secret cannot be written.
pub async fn spawn_command(
    command: LaunchCommand,
    name: String,
    address: String,
) -> LaunchResult<LaunchedProcess> {
    let session_id = Uuid::new_v4();
    let span = tracing::info_span!(
        span_names::SESSION_START,
        session_id = %session_id,
        connection = %name,
        address = %address
    );

    spawn_in_span(command, session_id, name, address)
        .instrument(span)
        .await
}

async fn spawn_in_span(
    command: LaunchCommand,
    session_id: Uuid,
    name: String,
    address: String,
) -> LaunchResult<LaunchedProcess> {
    tracing::debug!(command = %command.display_masked(), "Starting client");

    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args);
    cmd.stdin(if command.stdin_secret.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });

    let mut child = cmd.spawn().map_err(|e| LaunchError::Spawn {
        program: command.program.clone(),
        reason: e.to_string(),
    })?;

    if let Some(secret) = command.stdin_secret {
        if let Some(mut stdin) = child.stdin.take() {
            let mut payload = secret.expose_secret().as_bytes().to_vec();
            payload.push(b'\n');
            let written = stdin.write_all(&payload).await;
            payload.fill(0);

            match written {
                Ok(()) => {}
                // The client already exited; its exit code tells the story
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    tracing::debug!("Client closed stdin before reading credentials");
                }
                Err(e) => {
                    if let Err(kill_err) = child.start_kill() {
                        tracing::warn!(error = %kill_err, "Failed to stop client");
                    }
                    return Err(LaunchError::Credentials {
                        program: command.program,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    let pid = child.id();
    tracing::info!(pid = ?pid, "Client started");

    Ok(LaunchedProcess {
        session_id,
        pid,
        name,
        address,
        started_at: Utc::now(),
        child,
    })
}

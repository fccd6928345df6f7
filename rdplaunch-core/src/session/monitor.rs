//! Lifecycle monitoring of a launched client
//!
//! The monitor reports `connecting` as soon as it takes ownership of a
//! process, `successful` if the client is still running after the grace
//! period, and exactly one terminal event derived from the exit code.
//!
//! ```text
//! Idle -> Connecting -> [ProvisionallyConnected] -> Finished(closed | failed | lost)
//! ```

use std::process::ExitStatus;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::settings::{DEFAULT_GRACE_PERIOD_SECS, DEFAULT_NOTIFICATION_TITLE};
use crate::models::LifecycleEvent;
use crate::notify::{Notification, NotificationSink};
use crate::tracing::span_names;

use super::launcher::LaunchedProcess;

/// Exit code of a clean client shutdown
pub const EXIT_CODE_CLOSED: i32 = 0;

/// Exit code `FreeRDP` uses when the user ends the session
pub const EXIT_CODE_CLOSED_BY_USER: i32 = 12;

/// Exit codes reported as a normal disconnect
pub const EXIT_CODES_CLOSED: [i32; 2] = [EXIT_CODE_CLOSED, EXIT_CODE_CLOSED_BY_USER];

/// Exit code reported when the connection could not be established
pub const EXIT_CODE_FAILED: i32 = 141;

/// Exit code reported when an established session dropped
pub const EXIT_CODE_LOST: i32 = 147;

/// Maps a client exit code to its terminal event
#[must_use]
pub const fn classify_exit_code(code: i32) -> LifecycleEvent {
    match code {
        EXIT_CODE_CLOSED | EXIT_CODE_CLOSED_BY_USER => LifecycleEvent::Closed,
        EXIT_CODE_FAILED => LifecycleEvent::Failed,
        EXIT_CODE_LOST => LifecycleEvent::Lost,
        _ => LifecycleEvent::Failed,
    }
}

/// Returns the exit code of `status`
///
/// On Unix a process killed by signal `n` reports `128 + n`, the same value
/// a shell would show.
#[must_use]
pub fn exit_code_of(status: ExitStatus) -> Option<i32> {
    if let Some(code) = status.code() {
        return Some(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        status.signal().map(|signal| 128 + signal)
    }

    #[cfg(not(unix))]
    {
        None
    }
}

/// Position of a monitored process in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Not yet reported
    Idle,
    /// `connecting` reported
    Connecting,
    /// `successful` reported; still waiting for the exit
    ProvisionallyConnected,
    /// Terminal event reported
    Finished(LifecycleEvent),
}

impl MonitorState {
    /// Returns the state after `event`, or `None` if `event` is not allowed
    /// in this state
    #[must_use]
    pub const fn advance(self, event: LifecycleEvent) -> Option<Self> {
        match (self, event) {
            (Self::Idle, LifecycleEvent::Connecting) => Some(Self::Connecting),
            (Self::Connecting, LifecycleEvent::Successful) => Some(Self::ProvisionallyConnected),
            (Self::Connecting | Self::ProvisionallyConnected, terminal)
                if terminal.is_terminal() =>
            {
                Some(Self::Finished(terminal))
            }
            _ => None,
        }
    }
}

/// What the monitor observed for one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorReport {
    /// Session id of the process
    pub session_id: Uuid,
    /// Events emitted, in order
    pub events: Vec<LifecycleEvent>,
    /// Exit code, if one could be determined
    pub exit_code: Option<i32>,
}

impl MonitorReport {
    /// Returns the terminal event
    #[must_use]
    pub fn terminal(&self) -> Option<LifecycleEvent> {
        self.events.last().copied().filter(|e| e.is_terminal())
    }
}

/// Watches launched processes and reports their lifecycle to a sink
#[derive(Clone)]
pub struct LifecycleMonitor {
    sink: Arc<dyn NotificationSink>,
    title: String,
    grace_period: Duration,
}

impl LifecycleMonitor {
    /// Creates a monitor with the default title and grace period
    #[must_use]
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            sink,
            title: DEFAULT_NOTIFICATION_TITLE.to_string(),
            grace_period: Duration::from_secs(DEFAULT_GRACE_PERIOD_SECS),
        }
    }

    /// Sets the notification title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the grace period
    #[must_use]
    pub const fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Returns the grace period
    #[must_use]
    pub const fn grace_period(&self) -> Duration {
        self.grace_period
    }

    /// Monitors `process` on a background task
    ///
    /// Must be called from within a tokio runtime. Dropping the returned
    /// handle detaches the monitor; it keeps running until the process exits
    /// or the runtime shuts down.
    #[must_use]
    pub fn spawn(&self, process: LaunchedProcess) -> MonitorHandle {
        let monitor = self.clone();
        let session_id = process.session_id();
        MonitorHandle {
            session_id,
            task: tokio::spawn(async move { monitor.run(process).await }),
        }
    }

    /// Monitors `process` until it exits
    pub async fn run(&self, process: LaunchedProcess) -> MonitorReport {
        let span = tracing::info_span!(
            span_names::SESSION_MONITOR,
            session_id = %process.session_id(),
            pid = ?process.pid(),
            connection = %process.name(),
            address = %process.address()
        );
        self.observe(process).instrument(span).await
    }

    async fn observe(&self, mut process: LaunchedProcess) -> MonitorReport {
        let mut tracker = Tracker::new(process.session_id());

        self.emit(&mut tracker, LifecycleEvent::Connecting, &process)
            .await;

        let early = tokio::time::timeout(self.grace_period, process.child.wait()).await;
        let status = match early {
            Ok(status) => status,
            Err(_elapsed) => {
                // Heuristic only: the client survived the grace period
                self.emit(&mut tracker, LifecycleEvent::Successful, &process)
                    .await;
                process.child.wait().await
            }
        };

        let terminal = match status {
            Ok(status) => {
                tracker.exit_code = exit_code_of(status);
                match tracker.exit_code {
                    Some(code) => classify_exit_code(code),
                    None => LifecycleEvent::Failed,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to wait for client");
                LifecycleEvent::Failed
            }
        };

        let elapsed = Utc::now() - process.started_at();
        tracing::info!(
            exit_code = ?tracker.exit_code,
            event = %terminal,
            duration_secs = elapsed.num_seconds(),
            "Client exited"
        );

        self.emit(&mut tracker, terminal, &process).await;
        tracker.into_report()
    }

    async fn emit(&self, tracker: &mut Tracker, event: LifecycleEvent, process: &LaunchedProcess) {
        if !tracker.record(event) {
            tracing::error!(event = %event, state = ?tracker.state, "Invalid lifecycle transition");
            return;
        }

        tracing::debug!(event = %event, "Lifecycle event");
        let notification =
            Notification::for_event(event, &self.title, process.name(), process.address());
        self.sink.notify(notification).await;
    }
}

/// Handle to a monitor running on a background task
#[derive(Debug)]
pub struct MonitorHandle {
    session_id: Uuid,
    task: JoinHandle<MonitorReport>,
}

impl MonitorHandle {
    /// Session id of the monitored process
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Waits for the monitor to finish
    ///
    /// Returns `None` if the monitor task panicked or was cancelled.
    pub async fn wait(self) -> Option<MonitorReport> {
        match self.task.await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::error!(session_id = %self.session_id, error = %e, "Monitor task failed");
                None
            }
        }
    }
}

struct Tracker {
    session_id: Uuid,
    state: MonitorState,
    events: Vec<LifecycleEvent>,
    exit_code: Option<i32>,
}

impl Tracker {
    const fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            state: MonitorState::Idle,
            events: Vec::new(),
            exit_code: None,
        }
    }

    fn record(&mut self, event: LifecycleEvent) -> bool {
        match self.state.advance(event) {
            Some(next) => {
                self.state = next;
                self.events.push(event);
                true
            }
            None => false,
        }
    }

    fn into_report(self) -> MonitorReport {
        MonitorReport {
            session_id: self.session_id,
            events: self.events,
            exit_code: self.exit_code,
        }
    }
}

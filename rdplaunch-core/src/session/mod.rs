//! Client process sessions
//!
//! This module starts the remote desktop client and follows it until it
//! exits, translating the outcome into lifecycle events.

mod launcher;
mod monitor;

pub use launcher::{LaunchedProcess, ProcessLauncher, spawn_command};
pub use monitor::{
    EXIT_CODE_CLOSED, EXIT_CODE_CLOSED_BY_USER, EXIT_CODE_FAILED, EXIT_CODE_LOST,
    EXIT_CODES_CLOSED, LifecycleMonitor, MonitorHandle, MonitorReport, MonitorState,
    classify_exit_code, exit_code_of,
};

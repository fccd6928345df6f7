//! Connect command: select, resolve, launch, and follow one session.

use std::path::Path;
use std::sync::Arc;

use rdplaunch_core::menu::{Picker, Prompter, RofiPicker, RofiPrompter};
use rdplaunch_core::models::{LifecycleEvent, ResolvedConnection};
use rdplaunch_core::notify::{CommandSink, NotificationSink, TracingSink};
use rdplaunch_core::pipeline::{CancelReason, Launcher, PipelineOutcome, Preparation};

use crate::cli::ConnectArgs;
use crate::error::CliError;
use crate::terminal::{TerminalPicker, TerminalPrompter};
use crate::util::load_context;

/// Connect command handler
///
/// The interactive stage runs before the async runtime is built; the
/// session itself is awaited so every notification goes out before exit.
pub fn cmd_connect(config_path: Option<&Path>, args: &ConnectArgs) -> Result<(), CliError> {
    let (_manager, settings, store) = load_context(config_path)?;

    let (picker, prompter): (Box<dyn Picker>, Box<dyn Prompter>) = if args.terminal {
        (Box::new(TerminalPicker), Box::new(TerminalPrompter))
    } else {
        (
            Box::new(RofiPicker::new(settings.menu.program.clone())),
            Box::new(RofiPrompter::new(settings.menu.program.clone())),
        )
    };

    let sink: Arc<dyn NotificationSink> = if settings.notifications.enabled && !args.dry_run {
        Arc::new(CommandSink::from_settings(&settings.notifications))
    } else {
        Arc::new(TracingSink)
    };

    let launcher = Launcher::new(&store, picker.as_ref(), prompter.as_ref(), sink, settings);

    let connection = match (launcher.prepare(args.name.as_deref())?, args.name.as_deref()) {
        (Preparation::Ready(connection), _) => connection,
        (Preparation::Cancelled(CancelReason::SelectionDismissed), Some(name)) => {
            return Err(CliError::ConnectionNotFound(name.to_string()));
        }
        (Preparation::Cancelled(reason), _) => {
            tracing::debug!(reason = ?reason, "Nothing to launch");
            return Ok(());
        }
    };

    if args.dry_run {
        let command = launcher.process_launcher().command_for(&connection);
        println!("{}", command.display_masked());
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_session(&launcher, connection))
}

/// Starts the client and waits for its monitor to finish
async fn run_session(
    launcher: &Launcher<'_>,
    connection: ResolvedConnection,
) -> Result<(), CliError> {
    let name = connection.name.clone();

    let handle = match launcher.start(connection).await {
        PipelineOutcome::Monitoring(handle) => handle,
        PipelineOutcome::LaunchFailed(e) => return Err(e.into()),
        PipelineOutcome::Cancelled(_) => return Ok(()),
    };

    let Some(report) = handle.wait().await else {
        return Err(CliError::Connection(format!(
            "monitor for '{name}' stopped unexpectedly"
        )));
    };

    match report.terminal() {
        Some(event @ (LifecycleEvent::Failed | LifecycleEvent::Lost)) => {
            Err(CliError::Connection(match report.exit_code {
                Some(code) => format!("'{name}' {event} (exit code {code})"),
                None => format!("'{name}' {event}"),
            }))
        }
        _ => Ok(()),
    }
}

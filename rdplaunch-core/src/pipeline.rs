//! The launch pipeline: select, resolve, spawn, monitor
//!
//! [`Launcher::prepare`] runs the interactive part synchronously and either
//! yields a [`ResolvedConnection`] or a silent cancellation.
//! [`Launcher::start`] spawns the client and hands it to a background
//! [`LifecycleMonitor`].

use std::sync::Arc;

use crate::config::Settings;
use crate::credentials::{CredentialResolver, Resolution};
use crate::error::{ConfigResult, LaunchError};
use crate::menu::{Picker, Prompter};
use crate::models::{LifecycleEvent, ProfileField, ResolvedConnection};
use crate::notify::{Notification, NotificationSink};
use crate::profile::{ConnectionSelector, ProfileStore, find_profile, validate_profiles};
use crate::session::{LifecycleMonitor, MonitorHandle, ProcessLauncher};

/// Why a launch stopped before spawning anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    /// The picker was dismissed or returned an unknown name
    SelectionDismissed,
    /// A required field was left empty
    IncompleteCredentials(ProfileField),
}

/// Result of the interactive stage
#[derive(Debug)]
pub enum Preparation {
    /// Ready to launch
    Ready(ResolvedConnection),
    /// The user declined; nothing should be reported
    Cancelled(CancelReason),
}

/// Result of a whole launch
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The user declined before anything was spawned
    Cancelled(CancelReason),
    /// The client could not be started; `launch-error` was reported
    LaunchFailed(LaunchError),
    /// The client is running under a background monitor
    Monitoring(MonitorHandle),
}

/// Wires the pipeline stages to their collaborators
pub struct Launcher<'a> {
    store: &'a dyn ProfileStore,
    picker: &'a dyn Picker,
    prompter: &'a dyn Prompter,
    sink: Arc<dyn NotificationSink>,
    settings: Settings,
}

impl<'a> Launcher<'a> {
    /// Creates a launcher
    #[must_use]
    pub fn new(
        store: &'a dyn ProfileStore,
        picker: &'a dyn Picker,
        prompter: &'a dyn Prompter,
        sink: Arc<dyn NotificationSink>,
        settings: Settings,
    ) -> Self {
        Self {
            store,
            picker,
            prompter,
            sink,
            settings,
        }
    }

    /// Returns the settings in use
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the process launcher configured from settings
    #[must_use]
    pub fn process_launcher(&self) -> ProcessLauncher {
        ProcessLauncher::new(self.settings.client.clone())
    }

    /// Returns the lifecycle monitor configured from settings
    #[must_use]
    pub fn monitor(&self) -> LifecycleMonitor {
        LifecycleMonitor::new(Arc::clone(&self.sink))
            .with_title(self.settings.notifications.title.clone())
            .with_grace_period(self.settings.monitor.grace_period())
    }

    /// Loads profiles, lets the user choose one, and resolves its fields
    ///
    /// With `name` set the picker is skipped and the profile is looked up
    /// by exact name; an unknown name is a cancellation.
    ///
    /// Blocks on the picker and prompter.
    ///
    /// # Errors
    /// Returns a `ConfigError` if the profile store cannot be loaded or is
    /// invalid. No prompt is shown in that case.
    pub fn prepare(&self, name: Option<&str>) -> ConfigResult<Preparation> {
        let profiles = self.store.load()?;

        let selected = match name {
            Some(name) => {
                validate_profiles(&profiles)?;
                find_profile(&profiles, name)
            }
            None => ConnectionSelector::new(self.picker).select(&profiles)?,
        };

        let Some(profile) = selected else {
            return Ok(Preparation::Cancelled(CancelReason::SelectionDismissed));
        };

        tracing::info!(connection = %profile.name, "Connection selected");

        Ok(
            match CredentialResolver::new(self.prompter).resolve(profile) {
                Resolution::Resolved(connection) => Preparation::Ready(connection),
                Resolution::Incomplete(field) => {
                    Preparation::Cancelled(CancelReason::IncompleteCredentials(field))
                }
            },
        )
    }

    /// Spawns the client for `connection` and starts monitoring it
    ///
    /// A spawn failure is reported to the sink as `launch-error` and
    /// returned; the monitor is never started for it.
    pub async fn start(&self, connection: ResolvedConnection) -> PipelineOutcome {
        let name = connection.name.clone();
        let address = connection.address.clone();

        match self.process_launcher().launch(connection).await {
            Ok(process) => PipelineOutcome::Monitoring(self.monitor().spawn(process)),
            Err(e) => {
                tracing::error!(connection = %name, error = %e, "Failed to start client");
                let notification = Notification::for_event(
                    LifecycleEvent::LaunchError,
                    &self.settings.notifications.title,
                    &name,
                    &address,
                );
                self.sink.notify(notification).await;
                PipelineOutcome::LaunchFailed(e)
            }
        }
    }

    /// Runs the whole pipeline
    ///
    /// The interactive stage blocks the current thread.
    ///
    /// # Errors
    /// Returns a `ConfigError` if the profile store cannot be loaded.
    pub async fn run(&self, name: Option<&str>) -> ConfigResult<PipelineOutcome> {
        Ok(match self.prepare(name)? {
            Preparation::Ready(connection) => self.start(connection).await,
            Preparation::Cancelled(reason) => {
                tracing::debug!(reason = ?reason, "Launch cancelled");
                PipelineOutcome::Cancelled(reason)
            }
        })
    }
}

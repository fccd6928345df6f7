//! End-to-end launch pipeline scenarios

use rdplaunch_core::config::{ClientSettings, Settings};
use rdplaunch_core::error::{ConfigError, LaunchError};
use rdplaunch_core::models::{
    ConnectionProfile, FREE_FORM_NAME, LifecycleEvent, ProfileField, Severity,
};
use rdplaunch_core::pipeline::{CancelReason, Launcher, PipelineOutcome, Preparation};
use rdplaunch_core::profile::JsonProfileStore;
use secrecy::ExposeSecret;

use super::{MemoryStore, RecordingSink, ScriptedPicker, ScriptedPrompter};

fn office() -> ConnectionProfile {
    ConnectionProfile::new("Office")
        .with_address("10.0.0.5")
        .with_username("bob")
        .with_password("secret")
        .with_params("")
}

fn settings_with_client(program: &str) -> Settings {
    let mut settings = Settings::default();
    settings.client = ClientSettings {
        program: program.to_string(),
        ..ClientSettings::default()
    };
    settings.monitor.grace_period_secs = 5;
    settings
}

#[tokio::test]
async fn office_profile_launches_without_prompts() {
    let store = MemoryStore(vec![office()]);
    let picker = ScriptedPicker::answering(Some("Office"));
    let prompter = ScriptedPrompter::default();
    let sink = RecordingSink::new();
    let launcher = Launcher::new(
        &store,
        &picker,
        &prompter,
        sink.clone(),
        settings_with_client("true"),
    );

    let Preparation::Ready(connection) = launcher.prepare(None).unwrap() else {
        panic!("expected a resolved connection");
    };
    assert!(prompter.asked.borrow().is_empty());

    let command = launcher.process_launcher().command_for(&connection);
    assert_eq!(
        command.args,
        vec![
            "/u:bob",
            "/from-stdin",
            "/dynamic-resolution",
            "+clipboard",
            "/v:10.0.0.5"
        ]
    );

    let PipelineOutcome::Monitoring(handle) = launcher.start(connection).await else {
        panic!("expected the client to start");
    };
    let report = handle.wait().await.unwrap();
    assert_eq!(report.events.first(), Some(&LifecycleEvent::Connecting));
    assert_eq!(report.terminal(), Some(LifecycleEvent::Closed));

    let messages = sink.messages();
    assert_eq!(messages.first().unwrap(), "🔄 Connecting to Office - 10.0.0.5...");
    assert!(messages.last().unwrap().contains("closed normally"));
}

#[tokio::test]
async fn free_form_with_empty_params_uses_default_args() {
    let store = MemoryStore(vec![office()]);
    let picker = ScriptedPicker::answering(Some(FREE_FORM_NAME));
    let prompter =
        ScriptedPrompter::with_answers(&[Some("192.168.1.10"), Some("alice"), Some("pw"), None]);
    let sink = RecordingSink::new();
    let launcher = Launcher::new(
        &store,
        &picker,
        &prompter,
        sink.clone(),
        settings_with_client("true"),
    );

    let Preparation::Ready(connection) = launcher.prepare(None).unwrap() else {
        panic!("expected a resolved connection");
    };
    assert_eq!(prompter.asked.borrow().len(), 4);
    assert_eq!(connection.name, FREE_FORM_NAME);
    assert!(connection.params.is_none());

    let command = launcher.process_launcher().command_for(&connection);
    assert_eq!(command.args.last().unwrap(), "/v:192.168.1.10");
    assert!(command.args.contains(&"/dynamic-resolution".to_string()));

    let PipelineOutcome::Monitoring(handle) = launcher.start(connection).await else {
        panic!("expected the client to start");
    };
    assert_eq!(
        handle.wait().await.unwrap().terminal(),
        Some(LifecycleEvent::Closed)
    );
}

#[tokio::test]
async fn cancelled_picker_prompts_nothing_and_launches_nothing() {
    let store = MemoryStore(vec![office()]);
    let picker = ScriptedPicker::answering(None);
    let prompter = ScriptedPrompter::default();
    let sink = RecordingSink::new();
    let launcher = Launcher::new(
        &store,
        &picker,
        &prompter,
        sink.clone(),
        settings_with_client("true"),
    );

    let outcome = launcher.run(None).await.unwrap();
    assert!(matches!(
        outcome,
        PipelineOutcome::Cancelled(CancelReason::SelectionDismissed)
    ));
    assert!(prompter.asked.borrow().is_empty());
    assert!(sink.received().is_empty());
}

#[tokio::test]
async fn empty_username_aborts_silently() {
    let store = MemoryStore(Vec::new());
    let picker = ScriptedPicker::answering(Some(FREE_FORM_NAME));
    let prompter = ScriptedPrompter::with_answers(&[Some("10.0.0.9"), None]);
    let sink = RecordingSink::new();
    let launcher = Launcher::new(
        &store,
        &picker,
        &prompter,
        sink.clone(),
        settings_with_client("true"),
    );

    let outcome = launcher.run(None).await.unwrap();
    assert!(matches!(
        outcome,
        PipelineOutcome::Cancelled(CancelReason::IncompleteCredentials(ProfileField::Username))
    ));
    assert!(sink.received().is_empty());
}

#[tokio::test]
async fn spawn_failure_reports_only_launch_error() {
    let store = MemoryStore(vec![office()]);
    let picker = ScriptedPicker::answering(Some("Office"));
    let prompter = ScriptedPrompter::default();
    let sink = RecordingSink::new();
    let launcher = Launcher::new(
        &store,
        &picker,
        &prompter,
        sink.clone(),
        settings_with_client("/nonexistent/xfreerdp3"),
    );

    let outcome = launcher.run(None).await.unwrap();
    assert!(matches!(
        outcome,
        PipelineOutcome::LaunchFailed(LaunchError::Spawn { .. })
    ));

    let received = sink.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].severity, Severity::Critical);
    assert_eq!(
        received[0].message,
        "❌ Connection process was not started Office - 10.0.0.5"
    );
}

#[tokio::test]
async fn failing_client_reports_failed() {
    let store = MemoryStore(vec![office()]);
    let picker = ScriptedPicker::answering(Some("Office"));
    let prompter = ScriptedPrompter::default();
    let sink = RecordingSink::new();
    let launcher = Launcher::new(
        &store,
        &picker,
        &prompter,
        sink.clone(),
        settings_with_client("false"),
    );

    let PipelineOutcome::Monitoring(handle) = launcher.run(None).await.unwrap() else {
        panic!("expected the client to start");
    };
    let report = handle.wait().await.unwrap();
    assert_eq!(report.exit_code, Some(1));
    assert_eq!(
        report.events,
        vec![LifecycleEvent::Connecting, LifecycleEvent::Failed]
    );
}

#[tokio::test]
async fn duplicate_names_fail_before_any_prompt() {
    let store = MemoryStore(vec![office(), office()]);
    let picker = ScriptedPicker::answering(Some("Office"));
    let prompter = ScriptedPrompter::default();
    let sink = RecordingSink::new();
    let launcher = Launcher::new(
        &store,
        &picker,
        &prompter,
        sink.clone(),
        settings_with_client("true"),
    );

    let result = launcher.run(None).await;
    assert!(matches!(result, Err(ConfigError::DuplicateName(_))));
    assert_eq!(*picker.calls.borrow(), 0);
    assert!(sink.received().is_empty());
}

#[test]
fn named_launch_skips_picker() {
    let store = MemoryStore(vec![office()]);
    let picker = ScriptedPicker::answering(None);
    let prompter = ScriptedPrompter::default();
    let launcher = Launcher::new(
        &store,
        &picker,
        &prompter,
        RecordingSink::new(),
        Settings::default(),
    );

    assert!(matches!(
        launcher.prepare(Some("Office")).unwrap(),
        Preparation::Ready(_)
    ));
    assert!(matches!(
        launcher.prepare(Some("Nowhere")).unwrap(),
        Preparation::Cancelled(CancelReason::SelectionDismissed)
    ));
    assert_eq!(*picker.calls.borrow(), 0);
}

#[test]
fn monitor_follows_settings() {
    let store = MemoryStore(Vec::new());
    let picker = ScriptedPicker::answering(None);
    let prompter = ScriptedPrompter::default();
    let mut settings = Settings::default();
    settings.monitor.grace_period_secs = 9;

    let launcher = Launcher::new(&store, &picker, &prompter, RecordingSink::new(), settings);
    assert_eq!(launcher.monitor().grace_period().as_secs(), 9);
}

#[test]
fn legacy_json_store_feeds_the_picker() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rdp_connector.json");
    std::fs::write(
        &path,
        r#"[
            {"connection_name": "Office", "ip_address": "10.0.0.5", "username": "bob", "password": "secret", "params": ""},
            {"connection_name": "lab", "ip_address": "10.0.0.9", "username": "", "password": "", "params": "/f"}
        ]"#,
    )
    .unwrap();

    let store = JsonProfileStore::new(&path);
    let picker = ScriptedPicker::answering(Some("lab"));
    let prompter = ScriptedPrompter::with_answers(&[Some("carol"), Some("pw")]);
    let launcher = Launcher::new(
        &store,
        &picker,
        &prompter,
        RecordingSink::new(),
        Settings::default(),
    );

    let Preparation::Ready(connection) = launcher.prepare(None).unwrap() else {
        panic!("expected a resolved connection");
    };
    assert_eq!(prompter.asked.borrow().len(), 2);
    assert_eq!(connection.username, "carol");
    assert_eq!(connection.params.as_deref(), Some("/f"));

    let command = launcher.process_launcher().command_for(&connection);
    assert_eq!(command.args, vec!["/u:carol", "/from-stdin", "/f", "/v:10.0.0.9"]);
    assert!(!command.display_masked().contains("pw"));
}

#[test]
fn missing_store_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonProfileStore::new(dir.path().join("absent.json"));
    let picker = ScriptedPicker::answering(Some("Office"));
    let prompter = ScriptedPrompter::default();
    let launcher = Launcher::new(
        &store,
        &picker,
        &prompter,
        RecordingSink::new(),
        Settings::default(),
    );

    assert!(matches!(
        launcher.prepare(None),
        Err(ConfigError::NotFound(_))
    ));
    assert_eq!(*picker.calls.borrow(), 0);
}

#[test]
fn stored_office_profile_with_empty_params_needs_no_prompts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rdp_connector.json");
    std::fs::write(
        &path,
        r#"[{"connection_name": "Office", "ip_address": "10.0.0.5", "username": "bob", "password": " pa ss ", "params": ""}]"#,
    )
    .unwrap();

    let store = JsonProfileStore::new(&path);
    let picker = ScriptedPicker::answering(Some("Office"));
    let prompter = ScriptedPrompter::default();
    let launcher = Launcher::new(
        &store,
        &picker,
        &prompter,
        RecordingSink::new(),
        Settings::default(),
    );

    let Preparation::Ready(connection) = launcher.prepare(None).unwrap() else {
        panic!("expected a resolved connection");
    };
    assert!(prompter.asked.borrow().is_empty());
    assert_eq!(connection.password.expose_secret(), " pa ss ");

    let command = launcher.process_launcher().command_for(&connection);
    assert_eq!(
        command.args,
        vec![
            "/u:bob",
            "/from-stdin",
            "/dynamic-resolution",
            "+clipboard",
            "/v:10.0.0.5"
        ]
    );
}

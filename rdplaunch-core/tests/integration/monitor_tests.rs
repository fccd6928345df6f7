//! Lifecycle monitor behaviour against real child processes

use std::sync::Arc;
use std::time::Duration;

use rdplaunch_core::models::{LifecycleEvent, Severity};
use rdplaunch_core::protocol::LaunchCommand;
use rdplaunch_core::session::{LifecycleMonitor, spawn_command};

use super::RecordingSink;

fn shell(script: &str) -> LaunchCommand {
    LaunchCommand::new("sh", vec!["-c".to_string(), script.to_string()])
}

async fn monitor_script(script: &str, grace: Duration) -> (Vec<LifecycleEvent>, Arc<RecordingSink>) {
    let sink = RecordingSink::new();
    let monitor = LifecycleMonitor::new(sink.clone()).with_grace_period(grace);
    let process = spawn_command(shell(script), "Office".to_string(), "10.0.0.5".to_string())
        .await
        .expect("sh should start");
    let report = monitor.spawn(process).wait().await.expect("monitor finished");
    (report.events, sink)
}

#[tokio::test]
async fn exit_zero_after_grace_reports_connected_then_closed() {
    let (events, sink) = monitor_script("sleep 1; exit 0", Duration::from_millis(100)).await;

    assert_eq!(
        events,
        vec![
            LifecycleEvent::Connecting,
            LifecycleEvent::Successful,
            LifecycleEvent::Closed
        ]
    );
    let messages = sink.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0], "🔄 Connecting to Office - 10.0.0.5...");
    assert_eq!(messages[1], "✅ Connected to Office - 10.0.0.5");
    assert_eq!(messages[2], "🔌 Connection Office - 10.0.0.5 was closed normally");
}

#[tokio::test]
async fn exit_during_grace_skips_successful() {
    let (events, _sink) = monitor_script("exit 12", Duration::from_secs(5)).await;
    assert_eq!(events, vec![LifecycleEvent::Connecting, LifecycleEvent::Closed]);
}

#[tokio::test]
async fn exit_141_is_failed() {
    let (events, sink) = monitor_script("exit 141", Duration::from_secs(5)).await;
    assert_eq!(events, vec![LifecycleEvent::Connecting, LifecycleEvent::Failed]);
    assert_eq!(sink.received()[1].severity, Severity::Critical);
}

#[tokio::test]
async fn exit_147_is_lost() {
    let (events, sink) = monitor_script("exit 147", Duration::from_secs(5)).await;
    assert_eq!(events, vec![LifecycleEvent::Connecting, LifecycleEvent::Lost]);
    assert!(sink.messages()[1].contains("lost"));
}

#[tokio::test]
async fn unknown_exit_code_is_failed() {
    let (events, _sink) = monitor_script("exit 3", Duration::from_secs(5)).await;
    assert_eq!(events, vec![LifecycleEvent::Connecting, LifecycleEvent::Failed]);
}

#[tokio::test]
async fn lost_after_provisional_success() {
    let (events, _sink) = monitor_script("sleep 1; exit 147", Duration::from_millis(100)).await;
    assert_eq!(
        events,
        vec![
            LifecycleEvent::Connecting,
            LifecycleEvent::Successful,
            LifecycleEvent::Lost
        ]
    );
}

#[tokio::test]
async fn report_carries_exit_code() {
    let sink = RecordingSink::new();
    let monitor = LifecycleMonitor::new(sink).with_grace_period(Duration::from_secs(5));
    let process = spawn_command(shell("exit 12"), "Lab".to_string(), "10.0.0.7".to_string())
        .await
        .unwrap();
    let session_id = process.session_id();

    let report = monitor.run(process).await;
    assert_eq!(report.session_id, session_id);
    assert_eq!(report.exit_code, Some(12));
    assert_eq!(report.terminal(), Some(LifecycleEvent::Closed));
}

#[tokio::test]
async fn concurrent_monitors_each_emit_one_terminal_event() {
    let sink = RecordingSink::new();
    let monitor = LifecycleMonitor::new(sink.clone()).with_grace_period(Duration::from_secs(5));

    let mut handles = Vec::new();
    for (name, code) in [("A", 0), ("B", 141), ("C", 147)] {
        let process = spawn_command(
            shell(&format!("exit {code}")),
            name.to_string(),
            "10.0.0.1".to_string(),
        )
        .await
        .unwrap();
        handles.push(monitor.spawn(process));
    }

    for handle in handles {
        let report = handle.wait().await.unwrap();
        assert_eq!(report.events.len(), 2);
        assert_eq!(report.events[0], LifecycleEvent::Connecting);
    }

    let received = sink.received();
    assert_eq!(received.len(), 6);
    for name in ["A", "B", "C"] {
        let target = format!("{name} - 10.0.0.1");
        let for_target: Vec<_> = received
            .iter()
            .filter(|n| n.message.contains(&target))
            .collect();
        assert_eq!(for_target.len(), 2);
        assert!(for_target[0].message.starts_with("🔄 Connecting"));
    }
}

//! Property-based tests for exit code classification

use proptest::prelude::*;
use rdplaunch_core::models::LifecycleEvent;
use rdplaunch_core::session::{
    EXIT_CODE_CLOSED, EXIT_CODE_CLOSED_BY_USER, EXIT_CODE_FAILED, EXIT_CODE_LOST,
    EXIT_CODES_CLOSED, MonitorState, classify_exit_code,
};

/// Strategy for exit codes outside the known set
fn arb_unknown_code() -> impl Strategy<Value = i32> {
    any::<i32>().prop_filter("known exit code", |c| {
        !EXIT_CODES_CLOSED.contains(c) && *c != EXIT_CODE_FAILED && *c != EXIT_CODE_LOST
    })
}

#[test]
fn known_codes() {
    assert_eq!(classify_exit_code(0), LifecycleEvent::Closed);
    assert_eq!(classify_exit_code(12), LifecycleEvent::Closed);
    assert_eq!(classify_exit_code(141), LifecycleEvent::Failed);
    assert_eq!(classify_exit_code(147), LifecycleEvent::Lost);
}

#[test]
fn named_codes_match_the_closed_set() {
    assert_eq!(EXIT_CODES_CLOSED, [EXIT_CODE_CLOSED, EXIT_CODE_CLOSED_BY_USER]);
    assert_eq!(
        classify_exit_code(EXIT_CODE_CLOSED_BY_USER),
        LifecycleEvent::Closed
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any exit code maps to exactly one terminal event
    #[test]
    fn prop_classification_is_terminal(code in any::<i32>()) {
        prop_assert!(classify_exit_code(code).is_terminal());
    }

    /// Unknown exit codes are reported as failures
    #[test]
    fn prop_unknown_codes_fail(code in arb_unknown_code()) {
        prop_assert_eq!(classify_exit_code(code), LifecycleEvent::Failed);
    }

    /// Once finished, the state machine accepts no further events
    #[test]
    fn prop_state_machine_emits_one_terminal(code in any::<i32>(), provisional in any::<bool>()) {
        let mut state = MonitorState::Idle
            .advance(LifecycleEvent::Connecting)
            .expect("connecting starts a session");
        if provisional {
            state = state
                .advance(LifecycleEvent::Successful)
                .expect("success follows connecting");
        }

        let finished = state
            .advance(classify_exit_code(code))
            .expect("terminal event follows");

        for event in [
            LifecycleEvent::Connecting,
            LifecycleEvent::Successful,
            LifecycleEvent::Closed,
            LifecycleEvent::Failed,
            LifecycleEvent::Lost,
        ] {
            prop_assert!(finished.advance(event).is_none());
        }
    }
}

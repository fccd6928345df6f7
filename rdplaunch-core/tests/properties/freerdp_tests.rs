//! Property-based tests for `FreeRDP` command building

use proptest::prelude::*;
use rdplaunch_core::config::ClientSettings;
use rdplaunch_core::models::ResolvedConnection;
use rdplaunch_core::protocol::{FROM_STDIN_FLAG, LaunchCommand};
use secrecy::{ExposeSecret, SecretString};

/// Strategy for addresses, optionally with a port
fn arb_address() -> impl Strategy<Value = String> {
    ("[a-z0-9]([a-z0-9.-]{0,30}[a-z0-9])?", prop::option::of(1u16..65535)).prop_map(
        |(host, port)| match port {
            Some(port) => format!("{host}:{port}"),
            None => host,
        },
    )
}

/// Strategy for passwords distinctive enough to search for
fn arb_password() -> impl Strategy<Value = String> {
    "[A-Z]{4}[a-z0-9!@#$%]{8,20}"
}

/// Strategy for optional extra parameters
fn arb_params() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::collection::vec("[/+][a-z-]{1,12}", 1..5).prop_map(|v| v.join(" ")))
}

fn arb_connection() -> impl Strategy<Value = ResolvedConnection> {
    (arb_address(), "[a-z][a-z0-9_]{0,12}", arb_password(), arb_params()).prop_map(
        |(address, username, password, params)| ResolvedConnection {
            name: "Target".to_string(),
            address,
            username,
            password: SecretString::from(password),
            params,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The address argument is always last and unique
    #[test]
    fn prop_address_is_last(connection in arb_connection()) {
        let command = LaunchCommand::freerdp(&connection, &ClientSettings::default());
        let expected = format!("/v:{}", connection.address);

        prop_assert_eq!(command.args.last(), Some(&expected));
        prop_assert_eq!(command.args.iter().filter(|a| a.starts_with("/v:")).count(), 1);
    }

    /// The password is delivered on stdin, never on the command line
    #[test]
    fn prop_password_not_in_args(connection in arb_connection()) {
        let command = LaunchCommand::freerdp(&connection, &ClientSettings::default());
        let password = connection.password.expose_secret();

        prop_assert!(command.args.iter().all(|a| !a.contains(password)));
        prop_assert!(!command.display_masked().contains(password));
        prop_assert!(command.args.iter().any(|a| a == FROM_STDIN_FLAG));
        prop_assert_eq!(
            command.stdin_secret.as_ref().map(|s| s.expose_secret().to_string()),
            Some(password.to_string())
        );
    }

    /// Default arguments appear exactly when no extra parameters are given
    #[test]
    fn prop_default_args_only_without_params(connection in arb_connection()) {
        let client = ClientSettings::default();
        let command = LaunchCommand::freerdp(&connection, &client);
        let middle = &command.args[2..command.args.len() - 1];

        match &connection.params {
            None => prop_assert_eq!(middle, client.default_args.as_slice()),
            Some(params) => {
                let expected: Vec<&str> = params.split_whitespace().collect();
                prop_assert_eq!(middle.to_vec(), expected);
            }
        }
    }

    /// The username is the first argument
    #[test]
    fn prop_username_first(connection in arb_connection()) {
        let command = LaunchCommand::freerdp(&connection, &ClientSettings::default());
        prop_assert_eq!(&command.args[0], &format!("/u:{}", connection.username));
    }
}

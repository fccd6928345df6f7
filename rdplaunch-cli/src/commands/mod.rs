//! Command handler modules for the CLI.

mod completions;
mod config;
mod connect;
mod list;

use std::path::Path;

use crate::cli::{Commands, ConnectArgs};
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
///
/// Without a subcommand the top-level connect arguments are used.
pub fn dispatch(
    config_path: Option<&Path>,
    command: Option<Commands>,
    connect_args: &ConnectArgs,
) -> Result<(), CliError> {
    match command {
        None => connect::cmd_connect(config_path, connect_args),
        Some(Commands::Connect(args)) => connect::cmd_connect(config_path, &args),
        Some(Commands::List { format }) => list::cmd_list(config_path, format),
        Some(Commands::Config(subcmd)) => config::cmd_config(config_path, subcmd),
        Some(Commands::Completions { shell }) => completions::cmd_completions(shell),
    }
}

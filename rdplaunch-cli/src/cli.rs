//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Launch remote desktop connections from saved profiles
///
/// Without a subcommand `rdplaunch` behaves like `rdplaunch connect`.
#[derive(Parser)]
#[command(name = "rdplaunch")]
#[command(author, version, about = "Remote desktop connection launcher")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true, env = "RDPLAUNCH_CONFIG_DIR")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub connect: ConnectArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments of the connect flow
#[derive(Args, Debug, Default, Clone)]
pub struct ConnectArgs {
    /// Profile name; skips the picker when given
    pub name: Option<String>,

    /// Print the client command with secrets masked instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Use terminal prompts instead of rofi
    #[arg(short, long)]
    pub terminal: bool,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Select a profile, fill in missing fields, and start the client
    #[command(about = "Connect to a saved or ad-hoc remote desktop")]
    Connect(ConnectArgs),

    /// List saved profiles
    #[command(about = "List saved connection profiles")]
    List {
        /// Output format for the profile list
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Manage the settings file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(about = "Generate shell completions")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Settings file subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a settings file with default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective settings
    Show,
}

/// Output format for the list command
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    Table,
    /// Output as JSON
    Json,
}

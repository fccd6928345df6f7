//! `rdplaunch` - pick a remote desktop connection and launch it
//!
//! Provides the connect flow (rofi or terminal menus), profile listing,
//! settings management, and shell completions.

mod cli;
mod commands;
mod error;
mod terminal;
mod util;

use clap::Parser;
use cli::Cli;
use rdplaunch_core::tracing::{TracingConfig, TracingLevel, TracingOutput, init_tracing};

fn main() {
    let cli = Cli::parse();

    let level = if cli.quiet {
        TracingLevel::Error
    } else {
        TracingLevel::from_verbosity(cli.verbose)
    };
    let mut tracing_config = TracingConfig::new().with_level(level).with_env_filter();
    if let Some(path) = cli.log_file.clone() {
        tracing_config = tracing_config.with_output(TracingOutput::File(path));
    }
    if let Err(e) = init_tracing(&tracing_config) {
        eprintln!("Warning: {e}");
    }

    let result = commands::dispatch(cli.config.as_deref(), cli.command, &cli.connect);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}

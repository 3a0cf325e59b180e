//! Command-line entry point for alex.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use alex::cli::{self, args::Cli};

/// Environment variable controlling log verbosity.
const LOG_ENV: &str = "ALEX_LOG";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli::run(cli.command)
}

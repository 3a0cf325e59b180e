//! CLI support for the `alex` binary.

pub mod args;
pub mod commands;
pub mod context;

use std::process::ExitCode;

use args::Commands;

pub use context::CommandContext;

/// Runs the selected subcommand to completion.
pub fn run(command: Commands) -> ExitCode {
    commands::run(command)
}

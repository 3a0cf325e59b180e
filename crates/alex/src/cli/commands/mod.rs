//! Command implementations and dispatch.

pub mod add;
pub mod fetch;
pub mod init;
pub mod ls;
pub mod search;
pub mod sections;
mod shared;
pub mod stats;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
///
/// `init` runs without loading configuration so it works even when an
/// existing config file is invalid.
pub fn run(command: Commands) -> ExitCode {
    match command {
        Commands::Init(cmd) => init::run(&cmd),
        Commands::Fetch(cmd) => with_context(|ctx| fetch::run(&ctx, &cmd)),
        Commands::Sections(cmd) => with_context(|ctx| sections::run(&ctx, &cmd)),
        Commands::Search(cmd) => with_context(|ctx| search::run(&ctx, &cmd)),
        Commands::Ls(cmd) => with_context(|ctx| ls::run(&ctx, &cmd)),
        Commands::Stats(cmd) => with_context(|ctx| stats::run(&ctx, &cmd)),
        Commands::Add(cmd) => with_context(|ctx| add::run(&ctx, &cmd)),
    }
}

/// Loads the command context and hands it to a command body.
fn with_context(body: impl FnOnce(CommandContext) -> ExitCode) -> ExitCode {
    match CommandContext::load() {
        Ok(ctx) => body(ctx),
        Err(code) => code,
    }
}

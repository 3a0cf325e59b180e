//! Implementation of `alex add`.

use std::process::ExitCode;

use alex_document::parse_file;
use alex_store::{DuplicateResolver, FixedResolver};

use crate::{
    cli::{args::AddCommand, context::CommandContext},
    prompt::PromptResolver,
};

/// Parses a markdown file and stores it, resolving duplicates.
pub fn run(ctx: &CommandContext, cmd: &AddCommand) -> ExitCode {
    let document = match parse_file(&cmd.file) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let title = document
        .effective_query()
        .unwrap_or("Unknown")
        .to_string();

    let mut store = match ctx.open_store() {
        Ok(store) => store,
        Err(code) => return code,
    };

    let resolver: Box<dyn DuplicateResolver> = match cmd.on_duplicate {
        Some(mode) => Box::new(FixedResolver(mode)),
        None => Box::new(PromptResolver),
    };

    match store.store_document(document, resolver.as_ref()) {
        Ok(Some(id)) => {
            println!("Stored {title} ({id})");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("Skipped {title}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

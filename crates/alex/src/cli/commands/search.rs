//! Implementation of `alex search`.

use std::process::ExitCode;

use alex_query::{Operation, QueryData, QueryRequest};
use alex_store::FieldMatch;

use crate::cli::{args::SearchCommand, commands::shared, context::CommandContext};

/// Searches stored content for a term.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let mut dispatcher = match ctx.dispatcher() {
        Ok(d) => d,
        Err(code) => return code,
    };

    let mut request = QueryRequest::new(&cmd.term, Operation::SearchContent);
    if let Some(scope) = cmd.scope {
        request.scope = scope;
    }
    if let Some(limit) = cmd.limit {
        request.limit = limit;
    }
    let response = dispatcher.query(&request);

    shared::finish(&response, cmd.output.json, |data| {
        let QueryData::Matches(matches) = data else {
            return;
        };

        if matches.is_empty() {
            println!("No matches.");
            return;
        }

        for result in matches {
            println!("{}", result.title);
            for field in &result.matches {
                match field {
                    FieldMatch::Title { excerpt } => println!("  [title] {excerpt}"),
                    FieldMatch::Summary { excerpt } => println!("  [summary] {excerpt}"),
                    FieldMatch::Section { title, excerpt } => {
                        println!("  [{title}] {excerpt}");
                    }
                }
            }
            println!();
        }
    })
}

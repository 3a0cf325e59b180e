//! Implementation of `alex sections`.

use std::process::ExitCode;

use alex_query::{Operation, QueryData, QueryRequest};

use crate::cli::{args::SectionsCommand, commands::shared, context::CommandContext};

/// Shows an article's sections, optionally filtered by title.
pub fn run(ctx: &CommandContext, cmd: &SectionsCommand) -> ExitCode {
    let mut dispatcher = match ctx.dispatcher() {
        Ok(d) => d,
        Err(code) => return code,
    };

    let mut request = QueryRequest::new(&cmd.topic, Operation::FetchSections);
    request.section_filter = cmd.filter.clone();
    if let Some(limit) = cmd.limit {
        request.limit = limit;
    }
    let response = dispatcher.query(&request);

    shared::finish(&response, cmd.output.json, |data| {
        let QueryData::Sections(payload) = data else {
            return;
        };

        println!("{}", payload.document_info.title);
        if let Some(summary) = &payload.document_info.summary {
            println!();
            println!("{summary}");
        }

        if payload.sections.is_empty() {
            println!();
            println!("No sections matched.");
            return;
        }

        for entry in &payload.sections {
            println!();
            println!("{} (level {})", entry.section.title, entry.section.level);
            if !entry.section.content.is_empty() {
                println!("{}", entry.section.content);
            }
        }
    })
}

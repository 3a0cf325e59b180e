//! Implementation of `alex fetch`.

use std::process::ExitCode;

use alex_query::{Operation, QueryData, QueryRequest};

use crate::cli::{args::FetchCommand, commands::shared, context::CommandContext};

/// Fetches a full article, from the store or from Wikipedia.
pub fn run(ctx: &CommandContext, cmd: &FetchCommand) -> ExitCode {
    let mut dispatcher = match ctx.dispatcher() {
        Ok(d) => d,
        Err(code) => return code,
    };

    let request = QueryRequest::new(&cmd.topic, Operation::FetchDocument);
    let response = dispatcher.query(&request);

    shared::finish(&response, cmd.output.json, |data| {
        let QueryData::Document(stored) = data else {
            return;
        };
        let doc = &stored.document;

        println!("{}", doc.effective_query().unwrap_or("Unknown"));
        if let Some(url) = doc.effective_url() {
            println!("{url}");
        }
        println!();

        if !doc.summary.is_empty() {
            println!("{}", doc.summary);
            println!();
        }

        if !doc.section_hierarchy.is_empty() {
            println!("Sections:");
            for entry in &doc.section_hierarchy {
                let indent = "  ".repeat(usize::from(entry.level.saturating_sub(2)));
                println!("  {indent}{}", entry.title);
            }
            println!();
        }

        let stats = &doc.statistics;
        println!(
            "{} sections, {} words, depth {}",
            stats.total_sections, stats.total_words, stats.hierarchy_depth
        );
    })
}

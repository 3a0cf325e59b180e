//! Implementation of `alex stats`.

use std::process::ExitCode;

use alex_query::{Operation, QueryData, QueryRequest};
use alex_store::CollectionStats;
use comfy_table::Table;

use crate::cli::{args::StatsCommand, commands::shared, context::CommandContext};

/// Shows collection statistics.
pub fn run(ctx: &CommandContext, cmd: &StatsCommand) -> ExitCode {
    let mut dispatcher = match ctx.dispatcher() {
        Ok(d) => d,
        Err(code) => return code,
    };

    let request = QueryRequest::new("", Operation::GetStatistics);
    let response = dispatcher.query(&request);

    shared::finish(&response, cmd.output.json, |data| {
        let QueryData::Statistics(stats) = data else {
            return;
        };

        match stats {
            CollectionStats::Empty => println!("No documents stored."),
            CollectionStats::Populated {
                total_documents,
                total_sections,
                total_words,
                total_characters,
                average_sections_per_doc,
                max_hierarchy_depth,
            } => {
                let mut table = Table::new();
                table.add_row(vec!["Documents".to_string(), total_documents.to_string()]);
                table.add_row(vec!["Sections".to_string(), total_sections.to_string()]);
                table.add_row(vec!["Words".to_string(), total_words.to_string()]);
                table.add_row(vec![
                    "Characters".to_string(),
                    total_characters.to_string(),
                ]);
                table.add_row(vec![
                    "Avg sections/doc".to_string(),
                    average_sections_per_doc.to_string(),
                ]);
                table.add_row(vec![
                    "Max depth".to_string(),
                    max_hierarchy_depth.to_string(),
                ]);
                println!("{table}");
            }
        }
    })
}

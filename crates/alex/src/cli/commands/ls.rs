//! Implementation of `alex ls`.

use std::process::ExitCode;

use alex_query::{Operation, QueryData, QueryRequest};
use comfy_table::Table;

use crate::cli::{args::LsCommand, commands::shared, context::CommandContext};

/// Lists stored documents.
pub fn run(ctx: &CommandContext, cmd: &LsCommand) -> ExitCode {
    let mut dispatcher = match ctx.dispatcher() {
        Ok(d) => d,
        Err(code) => return code,
    };

    let mut request = QueryRequest::new("", Operation::ListDocuments);
    if let Some(limit) = cmd.limit {
        request.limit = limit;
    }
    let response = dispatcher.query(&request);

    shared::finish(&response, cmd.output.json, |data| {
        let QueryData::Documents(documents) = data else {
            return;
        };

        if documents.is_empty() {
            println!("No documents stored.");
            return;
        }

        let mut table = Table::new();
        table.set_header(vec!["Title", "Sections", "Words", "Created"]);
        for doc in documents {
            let (sections, words) = doc
                .stats
                .map(|s| (s.total_sections.to_string(), s.total_words.to_string()))
                .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
            table.add_row(vec![
                doc.title.clone(),
                sections,
                words,
                doc.created_at.format("%Y-%m-%d %H:%M").to_string(),
            ]);
        }
        println!("{table}");
    })
}

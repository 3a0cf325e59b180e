//! Interactive duplicate-resolution prompt.
//!
//! When `alex add` finds that an incoming document duplicates stored ones
//! and no `--on-duplicate` mode was given, this resolver asks the user. It
//! lives in the binary crate so the store's upsert logic stays free of
//! terminal I/O.

use std::io::{self, BufRead, Write};

use alex_document::Document;
use alex_store::{DuplicateResolver, StoredDocument, UpsertMode};

/// A [`DuplicateResolver`] that asks on stdin/stdout.
///
/// End-of-input or an interrupted read resolves to [`UpsertMode::Skip`].
#[derive(Debug, Default)]
pub struct PromptResolver;

impl DuplicateResolver for PromptResolver {
    fn resolve(&self, incoming: &Document, existing: &[StoredDocument]) -> UpsertMode {
        print_duplicate_report(incoming, existing);

        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            print!("Choose an action [1-4]: ");
            io::stdout().flush().ok();

            line.clear();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => {
                    println!("No answer; skipping.");
                    return UpsertMode::Skip;
                }
                Ok(_) => {}
            }

            match parse_choice(line.trim()) {
                Some(mode) => return mode,
                None => println!("Invalid choice. Enter 1-4 or skip/add/update/overwrite."),
            }
        }
    }
}

/// Maps a numeric or named answer to a mode.
fn parse_choice(answer: &str) -> Option<UpsertMode> {
    match answer {
        "1" => Some(UpsertMode::Skip),
        "2" => Some(UpsertMode::Add),
        "3" => Some(UpsertMode::Update),
        "4" => Some(UpsertMode::Overwrite),
        other => other.parse().ok(),
    }
}

/// Describes the incoming document and its duplicates.
fn print_duplicate_report(incoming: &Document, existing: &[StoredDocument]) {
    println!("Duplicate document detected.");
    println!(
        "  new: {} ({} sections, {} words)",
        incoming.effective_query().unwrap_or("Unknown"),
        incoming.statistics.total_sections,
        incoming.statistics.total_words
    );

    println!("  existing ({}):", existing.len());
    for stored in existing {
        println!(
            "    {} — created {}, {} sections",
            stored.document.effective_query().unwrap_or("Unknown"),
            stored.document.created_at.format("%Y-%m-%d %H:%M"),
            stored.document.statistics.total_sections
        );
    }

    println!("Actions: [1] skip  [2] add  [3] update  [4] overwrite");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_choices() {
        assert_eq!(parse_choice("1"), Some(UpsertMode::Skip));
        assert_eq!(parse_choice("2"), Some(UpsertMode::Add));
        assert_eq!(parse_choice("3"), Some(UpsertMode::Update));
        assert_eq!(parse_choice("4"), Some(UpsertMode::Overwrite));
    }

    #[test]
    fn test_named_choices() {
        assert_eq!(parse_choice("update"), Some(UpsertMode::Update));
        assert_eq!(parse_choice("OVERWRITE"), Some(UpsertMode::Overwrite));
    }

    #[test]
    fn test_invalid_choice() {
        assert_eq!(parse_choice("5"), None);
        assert_eq!(parse_choice(""), None);
    }
}

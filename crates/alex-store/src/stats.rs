//! Collection-wide statistics.
//!
//! Rolls the per-document statistics up into a single summary of the whole
//! collection. An empty collection is a distinct state, not a zero-valued
//! one, so callers can tell "nothing stored yet" apart from "documents with
//! no sections".

use serde::Serialize;

use crate::StoredDocument;

/// Aggregate statistics over a whole document collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum CollectionStats {
    /// The collection holds no documents.
    Empty,
    /// The collection holds at least one document.
    Populated {
        /// Number of stored documents.
        total_documents: usize,
        /// Sum of per-document section counts.
        total_sections: usize,
        /// Sum of per-document word counts.
        total_words: usize,
        /// Sum of per-document character counts.
        total_characters: usize,
        /// Mean sections per document, rounded to two decimals.
        average_sections_per_doc: f64,
        /// Deepest section hierarchy across all documents.
        max_hierarchy_depth: u8,
    },
}

/// Computes collection statistics from a snapshot.
pub fn aggregate(documents: &[StoredDocument]) -> CollectionStats {
    if documents.is_empty() {
        return CollectionStats::Empty;
    }

    let total_documents = documents.len();
    let mut total_sections = 0;
    let mut total_words = 0;
    let mut total_characters = 0;
    let mut max_hierarchy_depth = 0;

    for stored in documents {
        let stats = &stored.document.statistics;
        total_sections += stats.total_sections;
        total_words += stats.total_words;
        total_characters += stats.total_characters;
        max_hierarchy_depth = max_hierarchy_depth.max(stats.hierarchy_depth);
    }

    let average = total_sections as f64 / total_documents as f64;

    CollectionStats::Populated {
        total_documents,
        total_sections,
        total_words,
        total_characters,
        average_sections_per_doc: (average * 100.0).round() / 100.0,
        max_hierarchy_depth,
    }
}

#[cfg(test)]
mod tests {
    use alex_document::parse;

    use super::*;

    /// Wraps parsed documents into a snapshot with synthetic ids.
    fn snapshot(texts: &[&str]) -> Vec<StoredDocument> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| StoredDocument {
                id: format!("doc-{i}"),
                document: parse(text),
            })
            .collect()
    }

    #[test]
    fn test_empty_collection_is_distinct() {
        assert_eq!(aggregate(&[]), CollectionStats::Empty);
    }

    #[test]
    fn test_populated_rollup() {
        let docs = snapshot(&[
            "---\nsummary one.\n\n## A\n\nalpha beta\n\n### B\n\ngamma\n",
            "---\nsummary two.\n\n## C\n\ndelta\n",
        ]);
        let stats = aggregate(&docs);

        let CollectionStats::Populated {
            total_documents,
            total_sections,
            average_sections_per_doc,
            max_hierarchy_depth,
            ..
        } = stats
        else {
            panic!("expected populated stats");
        };

        assert_eq!(total_documents, 2);
        assert_eq!(total_sections, 3);
        assert_eq!(average_sections_per_doc, 1.5);
        assert_eq!(max_hierarchy_depth, 3);
    }

    #[test]
    fn test_sectionless_documents_are_populated_with_zeroes() {
        let docs = snapshot(&["---\njust a summary.\n"]);
        let stats = aggregate(&docs);

        let CollectionStats::Populated {
            total_sections,
            max_hierarchy_depth,
            ..
        } = stats
        else {
            panic!("expected populated stats");
        };

        assert_eq!(total_sections, 0);
        assert_eq!(max_hierarchy_depth, 0);
    }
}

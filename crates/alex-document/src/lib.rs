//! Encyclopedia article parsing for alex.
//!
//! This crate turns the loosely structured markdown produced by the article
//! fetcher into a [`Document`]: a summary, a keyed map of [`Section`]s, an
//! ordered hierarchy log, and derived statistics. It supports:
//! - `**Key:** Value` metadata extraction ahead of the `---` separator
//! - explicit (`##`..`######`) and heuristically inferred section headings
//! - nearest-enclosing-heading parent resolution for nested sections
//! - stable, normalized section keys

#![warn(missing_docs)]

mod error;
mod heading;
mod key;
mod metadata;
mod parse;
mod stats;

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use error::DocumentError;
pub use heading::{Heading, HeadingKind, classify};
pub use key::normalize;
pub use metadata::{MetadataLine, parse_metadata_line};
pub use parse::{parse, parse_file};
pub use stats::aggregate;

/// A parsed encyclopedia article.
///
/// Constructed in full by [`parse`] from one text blob; the only fields
/// mutated after construction are `updated_at` (set by the store on
/// update-in-place) and `source_file`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Free-form metadata captured from `**Key:** Value` lines before the
    /// separator, keys lower-cased with spaces replaced by underscores.
    pub metadata: BTreeMap<String, String>,
    /// Promoted copy of the `query` metadata key.
    pub query: Option<String>,
    /// Promoted copy of the `url` metadata key.
    pub url: Option<String>,
    /// Promoted copy of the `extract_format` metadata key.
    pub format: Option<String>,
    /// Promoted copy of the `extracted_on` metadata key.
    pub extracted_at: Option<String>,
    /// Body text preceding the first recognized section.
    pub summary: String,
    /// Sections keyed by normalized section key. On a key collision the
    /// later section overwrites the earlier entry.
    pub sections: HashMap<String, Section>,
    /// Ordered log of every heading encountered, in document order,
    /// independent of later key collisions.
    pub section_hierarchy: Vec<SectionRef>,
    /// Derived word/character/depth statistics.
    pub statistics: DocumentStats,
    /// When this document was parsed.
    pub created_at: DateTime<Utc>,
    /// Set only when the store replaces an existing document in place.
    pub updated_at: Option<DateTime<Utc>>,
    /// Optional provenance, e.g. the path of an ingested file.
    pub source_file: Option<String>,
}

impl Document {
    /// The `query` value this document answers to, preferring the promoted
    /// field over the raw metadata entry.
    pub fn effective_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .or_else(|| self.metadata.get("query").map(String::as_str))
    }

    /// The source URL, preferring the promoted field over raw metadata.
    pub fn effective_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .or_else(|| self.metadata.get("url").map(String::as_str))
    }
}

/// One section of a parsed document.
///
/// Immutable once attached: content, counts, and links are fixed at parse
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Original heading text, not normalized.
    pub title: String,
    /// Non-empty body lines joined with newlines, trimmed.
    pub content: String,
    /// Heading level. 2 is a top-level section, greater is nested; level 1
    /// is reserved for the summary, which is never stored here.
    pub level: u8,
    /// Whitespace-separated word count of `content`.
    pub word_count: usize,
    /// Unicode scalar count of `content`.
    pub character_count: usize,
    /// Key of the nearest preceding section with a strictly smaller level.
    pub parent_section: Option<String>,
    /// Keys of child sections, in attachment order.
    pub subsections: Vec<String>,
}

/// A `{key, title, level}` entry in the document's hierarchy log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRef {
    /// Normalized section key.
    pub key: String,
    /// Original heading text.
    pub title: String,
    /// Heading level.
    pub level: u8,
}

/// Derived statistics for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of distinct section keys.
    pub total_sections: usize,
    /// Word count across the summary and every section.
    pub total_words: usize,
    /// Character count across the summary and every section.
    pub total_characters: usize,
    /// Maximum heading level seen, 0 for a document without sections.
    pub hierarchy_depth: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_query_prefers_promoted() {
        let mut doc = parse("");
        doc.query = Some("Malaria".into());
        doc.metadata.insert("query".into(), "Other".into());
        assert_eq!(doc.effective_query(), Some("Malaria"));
    }

    #[test]
    fn test_effective_query_falls_back_to_metadata() {
        let mut doc = parse("");
        doc.metadata.insert("query".into(), "Malaria".into());
        assert_eq!(doc.effective_query(), Some("Malaria"));
    }

    #[test]
    fn test_effective_url_absent() {
        let doc = parse("");
        assert_eq!(doc.effective_url(), None);
    }
}

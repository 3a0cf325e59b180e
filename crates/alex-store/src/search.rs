//! Scoped content search with excerpt highlighting.
//!
//! Search is a case-insensitive substring scan over a snapshot of the
//! collection, restricted to a [`SearchScope`]. Every matching field yields a
//! highlighted excerpt: roughly [`EXCERPT_CONTEXT`] characters of context
//! split around the first occurrence, ellipsis-marked where truncated, with
//! each occurrence of the term inside the excerpt wrapped in `**` emphasis
//! markers.

use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::StoredDocument;

/// Total context budget around a match, split across both sides.
const EXCERPT_CONTEXT: usize = 150;

/// Which document fields a search inspects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Titles, summaries, and section content.
    #[default]
    All,
    /// Document titles (the query field) only.
    Titles,
    /// Document summaries only.
    Summaries,
    /// Section content only.
    Sections,
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::All => "all",
            Self::Titles => "titles",
            Self::Summaries => "summaries",
            Self::Sections => "sections",
        };
        f.write_str(name)
    }
}

impl FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "titles" => Ok(Self::Titles),
            "summaries" => Ok(Self::Summaries),
            "sections" => Ok(Self::Sections),
            other => Err(format!(
                "unknown search scope '{other}' (expected all, titles, summaries, or sections)"
            )),
        }
    }
}

/// One document matching a content search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch {
    /// Store identity of the matching document.
    pub id: String,
    /// Document title (its query), or "Unknown".
    pub title: String,
    /// Source URL, empty when unknown.
    pub url: String,
    /// One entry per matching field, with a highlighted excerpt.
    pub matches: Vec<FieldMatch>,
}

/// A highlighted excerpt from one matching field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "field")]
pub enum FieldMatch {
    /// The document title matched.
    Title {
        /// Highlighted title text.
        excerpt: String,
    },
    /// The document summary matched.
    Summary {
        /// Highlighted excerpt from the summary.
        excerpt: String,
    },
    /// A section's content matched.
    Section {
        /// The matching section's title.
        title: String,
        /// Highlighted excerpt from the section content.
        excerpt: String,
    },
}

/// Scans a collection snapshot for documents matching `term` within `scope`.
///
/// An empty or whitespace-only term matches nothing. Results keep the
/// snapshot's order; section matches follow the document's hierarchy order.
pub fn search_documents(
    documents: &[StoredDocument],
    term: &str,
    scope: SearchScope,
) -> Vec<SearchMatch> {
    let term = term.trim();
    if term.is_empty() {
        return Vec::new();
    }

    documents
        .iter()
        .filter_map(|stored| match_document(stored, term, scope))
        .collect()
}

/// Collects field matches for one document, or `None` when nothing matched.
fn match_document(
    stored: &StoredDocument,
    term: &str,
    scope: SearchScope,
) -> Option<SearchMatch> {
    let doc = &stored.document;
    let title = doc.effective_query().unwrap_or("Unknown");
    let mut matches = Vec::new();

    if matches!(scope, SearchScope::All | SearchScope::Titles) && contains(title, term) {
        matches.push(FieldMatch::Title {
            excerpt: highlight(title, term),
        });
    }

    if matches!(scope, SearchScope::All | SearchScope::Summaries) && contains(&doc.summary, term) {
        matches.push(FieldMatch::Summary {
            excerpt: highlight(&doc.summary, term),
        });
    }

    if matches!(scope, SearchScope::All | SearchScope::Sections) {
        let mut seen = HashSet::new();
        for entry in &doc.section_hierarchy {
            if !seen.insert(entry.key.as_str()) {
                continue;
            }
            let Some(section) = doc.sections.get(&entry.key) else {
                continue;
            };
            if contains(&section.content, term) {
                matches.push(FieldMatch::Section {
                    title: section.title.clone(),
                    excerpt: highlight(&section.content, term),
                });
            }
        }
    }

    if matches.is_empty() {
        return None;
    }

    Some(SearchMatch {
        id: stored.id.clone(),
        title: title.to_string(),
        url: doc.effective_url().unwrap_or_default().to_string(),
        matches,
    })
}

/// Case-insensitive substring test.
fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Builds a highlighted excerpt around the first occurrence of `term`.
///
/// The excerpt spans half of [`EXCERPT_CONTEXT`] on each side of the match,
/// snapped to char boundaries, with `...` at whichever ends were truncated.
/// Every occurrence of the term inside the excerpt is wrapped in `**`.
fn highlight(text: &str, term: &str) -> String {
    let lower_text = text.to_lowercase();
    let lower_term = term.to_lowercase();

    // Lowercasing changes byte lengths for a handful of scripts; when it
    // does, offsets into the lowered text no longer map back, so skip
    // highlighting rather than slice at a wrong position.
    if lower_text.len() != text.len() {
        return text.to_string();
    }

    let Some(start) = lower_text.find(&lower_term) else {
        return text.to_string();
    };

    let half = EXCERPT_CONTEXT / 2;
    let begin = snap_to_char_boundary(text, start.saturating_sub(half));
    let end = snap_to_char_boundary(text, (start + lower_term.len() + half).min(text.len()));

    let mut excerpt = wrap_occurrences(&text[begin..end], &lower_term);
    if begin > 0 {
        excerpt.insert_str(0, "...");
    }
    if end < text.len() {
        excerpt.push_str("...");
    }
    excerpt
}

/// Wraps every case-insensitive occurrence of `lower_term` in `**`,
/// preserving the original casing of the matched text.
fn wrap_occurrences(excerpt: &str, lower_term: &str) -> String {
    let lower = excerpt.to_lowercase();
    let mut out = String::with_capacity(excerpt.len());
    let mut cursor = 0;

    while let Some(found) = lower[cursor..].find(lower_term) {
        let at = snap_to_char_boundary(excerpt, cursor + found);
        let after = snap_to_char_boundary(excerpt, (at + lower_term.len()).min(excerpt.len()));
        if after <= at {
            break;
        }
        out.push_str(&excerpt[cursor..at]);
        out.push_str("**");
        out.push_str(&excerpt[at..after]);
        out.push_str("**");
        cursor = after;
    }
    out.push_str(&excerpt[cursor..]);
    out
}

/// Snaps a byte index back to the nearest valid UTF-8 char boundary.
fn snap_to_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use alex_document::parse;

    use super::*;

    /// Builds a one-document snapshot from raw article text.
    fn snapshot(text: &str) -> Vec<StoredDocument> {
        vec![StoredDocument {
            id: "doc-1".into(),
            document: parse(text),
        }]
    }

    const ARTICLE: &str = "\
**Query:** Malaria

**URL:** https://en.wikipedia.org/wiki/Malaria

---

Malaria is a mosquito-borne infectious disease affecting humans.

## Transmission

The parasite is spread by Anopheles mosquitoes at night.
";

    #[test]
    fn test_all_scope_matches_every_field() {
        let docs = snapshot(ARTICLE);
        let results = search_documents(&docs, "malaria", SearchScope::All);

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.title, "Malaria");
        // Title and summary match; the section does not mention the term.
        assert_eq!(result.matches.len(), 2);
        assert!(matches!(result.matches[0], FieldMatch::Title { .. }));
        assert!(matches!(result.matches[1], FieldMatch::Summary { .. }));
    }

    #[test]
    fn test_sections_scope_ignores_summary() {
        let docs = snapshot(ARTICLE);
        let results = search_documents(&docs, "anopheles", SearchScope::Sections);

        assert_eq!(results.len(), 1);
        assert!(matches!(
            &results[0].matches[0],
            FieldMatch::Section { title, .. } if title == "Transmission"
        ));

        assert!(search_documents(&docs, "mosquito-borne", SearchScope::Sections).is_empty());
    }

    #[test]
    fn test_titles_scope() {
        let docs = snapshot(ARTICLE);
        assert_eq!(search_documents(&docs, "mala", SearchScope::Titles).len(), 1);
        assert!(search_documents(&docs, "anopheles", SearchScope::Titles).is_empty());
    }

    #[test]
    fn test_no_match_yields_nothing() {
        let docs = snapshot(ARTICLE);
        assert!(search_documents(&docs, "tuberculosis", SearchScope::All).is_empty());
    }

    #[test]
    fn test_empty_term_matches_nothing() {
        let docs = snapshot(ARTICLE);
        assert!(search_documents(&docs, "   ", SearchScope::All).is_empty());
    }

    #[test]
    fn test_highlight_wraps_match() {
        let highlighted = highlight("malaria is a disease", "mala");
        assert_eq!(highlighted, "**mala**ria is a disease");
    }

    #[test]
    fn test_highlight_preserves_case() {
        let highlighted = highlight("Malaria and malaria", "MALARIA");
        assert_eq!(highlighted, "**Malaria** and **malaria**");
    }

    #[test]
    fn test_highlight_truncates_with_ellipsis() {
        let padding = "x".repeat(200);
        let text = format!("{padding} malaria sits here {padding}");
        let highlighted = highlight(&text, "malaria");

        assert!(highlighted.starts_with("..."));
        assert!(highlighted.ends_with("..."));
        assert!(highlighted.contains("**malaria**"));
        // Excerpt stays near the context budget plus markers and ellipses.
        assert!(highlighted.len() < EXCERPT_CONTEXT + 40);
    }

    #[test]
    fn test_highlight_no_leading_ellipsis_at_text_start() {
        let text = format!("malaria {}", "y".repeat(200));
        let highlighted = highlight(&text, "malaria");

        assert!(highlighted.starts_with("**malaria**"));
        assert!(highlighted.ends_with("..."));
    }

    #[test]
    fn test_highlight_multibyte_safety() {
        let text = "préambule malaria café ☕ suite";
        let highlighted = highlight(text, "malaria");
        assert!(highlighted.contains("**malaria**"));
        assert!(highlighted.contains('☕'));
    }
}

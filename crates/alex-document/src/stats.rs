//! Derived document statistics.
//!
//! Statistics are computed once, after the section tree is fully built, and
//! stored on the document. Keeping the rollup in its own function makes the
//! arithmetic testable against hand-computed fixtures.

use crate::{Document, DocumentStats};

/// Aggregates word, character, and depth statistics for a parsed document.
///
/// - `total_sections` counts distinct section keys (collisions collapse).
/// - `total_words` and `total_characters` cover the summary plus every
///   surviving section.
/// - `hierarchy_depth` is the maximum level in the hierarchy log, including
///   entries later overwritten by key collisions; 0 for a sectionless
///   document.
pub fn aggregate(document: &Document) -> DocumentStats {
    let section_words: usize = document.sections.values().map(|s| s.word_count).sum();
    let section_chars: usize = document
        .sections
        .values()
        .map(|s| s.character_count)
        .sum();

    DocumentStats {
        total_sections: document.sections.len(),
        total_words: document.summary.split_whitespace().count() + section_words,
        total_characters: document.summary.chars().count() + section_chars,
        hierarchy_depth: document
            .section_hierarchy
            .iter()
            .map(|s| s.level)
            .max()
            .unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_summary_and_one_section() {
        let text = "---\na b c\n\n## Letters\n\nd e\n";
        let doc = parse(text);

        assert_eq!(doc.summary, "a b c");
        assert_eq!(doc.statistics.total_sections, 1);
        assert_eq!(doc.statistics.total_words, 5);
        // "a b c" is 5 characters, "d e" is 3.
        assert_eq!(doc.statistics.total_characters, 8);
        assert_eq!(doc.statistics.hierarchy_depth, 2);
    }

    #[test]
    fn test_empty_document() {
        let doc = parse("");
        assert_eq!(doc.statistics, DocumentStats::default());
    }

    #[test]
    fn test_depth_tracks_deepest_heading() {
        let text = "---\nintro.\n\n## A\n\na text\n\n### B\n\nb text\n\n#### C\n\nc text\n";
        let doc = parse(text);
        assert_eq!(doc.statistics.hierarchy_depth, 4);
    }

    #[test]
    fn test_collision_counts_surviving_section_once() {
        // Both headings normalize to the same key; the second overwrites the
        // first in `sections`, so only its words are counted.
        let text = "---\n## Treatment!\n\none two three\n\n## Treatment?\n\nfour five\n";
        let doc = parse(text);

        assert_eq!(doc.statistics.total_sections, 1);
        assert_eq!(doc.statistics.total_words, 2);
        assert_eq!(doc.section_hierarchy.len(), 2);
    }
}

//! Line-level heading classification.
//!
//! The article text this crate consumes is heading-ambiguous: most section
//! titles carry explicit `##` markup, but some arrive as bare lines of plain
//! text. [`classify`] decides, for a single body line with lookahead context,
//! whether it opens a new section and at what level.
//!
//! Classification never fails. A line that is neither an explicit nor an
//! inferred heading is a content line and stays with the open section.

/// Maximum trimmed length of a line the inference heuristic will consider.
const MAX_INFERRED_LEN: usize = 80;

/// Maximum whitespace-separated tokens in an inferred heading.
const MAX_INFERRED_TOKENS: usize = 8;

/// How many raw lines the prose lookahead scans past the candidate.
const LOOKAHEAD_LINES: usize = 3;

/// Level assigned to every heading recognized by the plain-text heuristic.
/// Inferred headings are never nested.
const INFERRED_LEVEL: u8 = 2;

/// How a heading was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingKind {
    /// Explicit markdown markup: 2-6 leading `#` characters.
    Explicit,
    /// Plain text that the prose-lookahead heuristic judged to be a title.
    Inferred,
}

/// A recognized section heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// The heading text, trimmed, markup stripped.
    pub title: String,
    /// Heading level: the number of `#` characters for explicit headings,
    /// fixed at 2 for inferred ones.
    pub level: u8,
    /// Whether the heading was explicit or inferred.
    pub kind: HeadingKind,
}

/// Classifies the line at `index` within the body of a document.
///
/// Returns `None` for content lines and blank lines. `lines` must be the raw
/// (untrimmed) lines of the full input so that the lookahead sees blank lines
/// as blank.
pub fn classify(lines: &[&str], index: usize) -> Option<Heading> {
    let line = lines.get(index)?.trim();
    if line.is_empty() {
        return None;
    }

    explicit(line).or_else(|| inferred(line, lines, index))
}

/// Parses an explicit `##`..`######` heading.
///
/// A single `#` is a document title, not a section, and seven or more are
/// not markup this format produces; both fall through to content.
fn explicit(line: &str) -> Option<Heading> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(2..=6).contains(&hashes) {
        return None;
    }

    let rest = &line[hashes..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let title = rest.trim();
    if title.is_empty() {
        return None;
    }

    Some(Heading {
        title: title.to_string(),
        level: hashes as u8,
        kind: HeadingKind::Explicit,
    })
}

/// Applies the plain-text heading heuristic.
///
/// A line is an inferred heading when all of:
/// - it is shorter than [`MAX_INFERRED_LEN`] characters,
/// - the immediately following raw line is non-empty,
/// - it does not end like a sentence fragment (`.`, `,`, `;`),
/// - it has at most [`MAX_INFERRED_TOKENS`] tokens,
/// - at least one of the first two non-empty lines within the next
///   [`LOOKAHEAD_LINES`] raw lines ends in `.` (i.e. looks like prose).
fn inferred(line: &str, lines: &[&str], index: usize) -> Option<Heading> {
    // Markup-prefixed lines are never inferred: a lone `#` is a document
    // title and anything else `#`-like already failed explicit parsing.
    if line.starts_with('#') {
        return None;
    }
    if line.chars().count() >= MAX_INFERRED_LEN {
        return None;
    }
    let next = lines.get(index + 1)?;
    if next.trim().is_empty() {
        return None;
    }
    if line.ends_with('.') || line.ends_with(',') || line.ends_with(';') {
        return None;
    }
    if line.split_whitespace().count() > MAX_INFERRED_TOKENS {
        return None;
    }

    let prose_follows = lines
        .iter()
        .skip(index + 1)
        .take(LOOKAHEAD_LINES)
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .take(2)
        .any(|l| l.ends_with('.'));
    if !prose_follows {
        return None;
    }

    Some(Heading {
        title: line.to_string(),
        level: INFERRED_LEVEL,
        kind: HeadingKind::Inferred,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Convenience wrapper: classify line 0 of a small corpus.
    fn classify_first(lines: &[&str]) -> Option<Heading> {
        classify(lines, 0)
    }

    #[test]
    fn test_explicit_levels() {
        for (line, level) in [
            ("## Overview", 2),
            ("### Details", 3),
            ("#### Fine print", 4),
            ("##### Deeper", 5),
            ("###### Deepest", 6),
        ] {
            let heading = classify_first(&[line, "Prose."]).expect(line);
            assert_eq!(heading.level, level);
            assert_eq!(heading.kind, HeadingKind::Explicit);
        }
    }

    #[test]
    fn test_explicit_title_stripped() {
        let heading = classify_first(&["##   Signs and symptoms  ", ""]).unwrap();
        assert_eq!(heading.title, "Signs and symptoms");
    }

    #[test]
    fn test_single_hash_is_not_a_section() {
        // A lone `#` line is a document title, never a section heading,
        // even when prose follows.
        assert!(classify_first(&["# Title", "Prose follows."]).is_none());
    }

    #[test]
    fn test_seven_hashes_is_content() {
        assert!(classify_first(&["####### Too deep", "Prose."]).is_none());
    }

    #[test]
    fn test_hashes_without_space_is_content() {
        assert!(classify_first(&["##NoSpace", "Prose."]).is_none());
    }

    #[test]
    fn test_inferred_heading_positive() {
        let lines = ["Early History", "Malaria has afflicted humans for millennia."];
        let heading = classify(&lines, 0).expect("should infer heading");
        assert_eq!(heading.title, "Early History");
        assert_eq!(heading.level, 2);
        assert_eq!(heading.kind, HeadingKind::Inferred);
    }

    #[test]
    fn test_inferred_requires_following_prose() {
        // Next lines do not end in '.', so this is not a heading.
        let lines = ["Early History", "a list item", "another item"];
        assert!(classify(&lines, 0).is_none());
    }

    #[test]
    fn test_inferred_rejects_sentence_endings() {
        for line in ["This ends badly.", "trailing comma,", "semicolon;"] {
            let lines = [line, "Follow-up prose."];
            assert!(classify(&lines, 0).is_none(), "{line}");
        }
    }

    #[test]
    fn test_inferred_rejects_long_lines() {
        let long = "word ".repeat(20);
        let lines = [long.as_str(), "Prose follows."];
        assert!(classify(&lines, 0).is_none());
    }

    #[test]
    fn test_inferred_rejects_too_many_tokens() {
        let lines = [
            "one two three four five six seven eight nine",
            "Prose follows.",
        ];
        assert!(classify(&lines, 0).is_none());
    }

    #[test]
    fn test_inferred_rejects_blank_next_line() {
        let lines = ["Candidate", "", "Prose follows."];
        assert!(classify(&lines, 0).is_none());
    }

    #[test]
    fn test_inferred_at_end_of_input() {
        // No next line at all.
        let lines = ["Candidate"];
        assert!(classify(&lines, 0).is_none());
    }

    #[test]
    fn test_inferred_lookahead_window() {
        // The prose sentinel sits on the second non-empty lookahead line.
        let lines = ["Transmission", "Mosquito vectors", "Anopheles bites at night."];
        assert!(classify(&lines, 0).is_some());

        // Beyond the first two non-empty lines it no longer counts.
        let lines = ["Transmission", "vectors", "hosts", "Far away sentence."];
        assert!(classify(&lines, 0).is_none());
    }

    #[test]
    fn test_blank_line_is_not_a_heading() {
        assert!(classify(&["", "Prose."], 0).is_none());
    }

    #[test]
    fn test_content_line_falls_through() {
        let lines = [
            "The parasite is transmitted through the bite of a mosquito",
            "and develops in the liver.",
        ];
        // Ends without punctuation but has too many tokens: content.
        assert!(classify(&lines, 0).is_none());
    }
}

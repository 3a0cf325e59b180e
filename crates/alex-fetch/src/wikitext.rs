//! Plain-wikitext section splitting.
//!
//! MediaWiki `explaintext` extracts mark sections with balanced equals
//! signs:
//!
//! ```text
//! Lead paragraph.
//!
//! == History ==
//! Text.
//!
//! === Antiquity ===
//! More text.
//! ```
//!
//! [`split_sections`] turns that stream into a lead summary plus a flat,
//! ordered section list with nesting depths.

use crate::ArticleSection;

/// Splits a plain-wikitext extract into its lead text and sections.
///
/// `== Title ==` opens a depth-1 section, `=== Title ===` depth-2, and so
/// on. Unbalanced or empty markers are treated as body text. Section bodies
/// are trimmed; sections with empty bodies are kept (they often only hold
/// subsections).
pub fn split_sections(extract: &str) -> (String, Vec<ArticleSection>) {
    let mut summary = String::new();
    let mut sections: Vec<ArticleSection> = Vec::new();
    let mut open: Option<(String, u8)> = None;
    let mut body = String::new();

    for line in extract.lines() {
        if let Some((title, depth)) = heading_marker(line) {
            flush(&mut summary, &mut sections, open.take(), &body);
            body.clear();
            open = Some((title, depth));
            continue;
        }
        body.push_str(line);
        body.push('\n');
    }
    flush(&mut summary, &mut sections, open, &body);

    (summary, sections)
}

/// Parses a `== Title ==` heading marker.
///
/// Returns the title and depth (number of `=` minus one) when the line is a
/// balanced marker with a non-empty title.
fn heading_marker(line: &str) -> Option<(String, u8)> {
    let trimmed = line.trim();
    let leading = trimmed.bytes().take_while(|&b| b == b'=').count();
    if leading < 2 || leading * 2 >= trimmed.len() {
        return None;
    }

    let trailing = trimmed.bytes().rev().take_while(|&b| b == b'=').count();
    if trailing != leading {
        return None;
    }

    let title = trimmed[leading..trimmed.len() - trailing].trim();
    if title.is_empty() {
        return None;
    }

    Some((title.to_string(), (leading - 1) as u8))
}

/// Closes the open section (or the lead) with the buffered body text.
fn flush(
    summary: &mut String,
    sections: &mut Vec<ArticleSection>,
    open: Option<(String, u8)>,
    body: &str,
) {
    let text = body.trim();
    match open {
        None => *summary = text.to_string(),
        Some((title, depth)) => sections.push(ArticleSection {
            title,
            depth,
            text: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTRACT: &str = "\
Malaria is a mosquito-borne disease.

== Signs and symptoms ==
Fever and chills.

=== Complications ===
Severe malaria may follow.

== Treatment ==
Antimalarial medication.
";

    #[test]
    fn test_lead_and_sections() {
        let (summary, sections) = split_sections(EXTRACT);

        assert_eq!(summary, "Malaria is a mosquito-borne disease.");
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].title, "Signs and symptoms");
        assert_eq!(sections[0].depth, 1);
        assert_eq!(sections[1].title, "Complications");
        assert_eq!(sections[1].depth, 2);
        assert_eq!(sections[2].title, "Treatment");
        assert_eq!(sections[2].text, "Antimalarial medication.");
    }

    #[test]
    fn test_no_sections() {
        let (summary, sections) = split_sections("Just a lead paragraph.\n");
        assert_eq!(summary, "Just a lead paragraph.");
        assert!(sections.is_empty());
    }

    #[test]
    fn test_empty_section_body_kept() {
        let extract = "Lead.\n\n== Parent ==\n\n=== Child ===\nText.\n";
        let (_, sections) = split_sections(extract);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].text, "");
        assert_eq!(sections[1].text, "Text.");
    }

    #[test]
    fn test_unbalanced_marker_is_body_text() {
        let extract = "Lead.\n\n== Oops =\nstill lead.\n";
        let (summary, sections) = split_sections(extract);

        assert!(sections.is_empty());
        assert!(summary.contains("== Oops ="));
    }

    #[test]
    fn test_single_equals_is_body_text() {
        assert!(heading_marker("= Title =").is_none());
    }

    #[test]
    fn test_marker_with_empty_title() {
        assert!(heading_marker("====").is_none());
        assert!(heading_marker("== ==").is_none());
    }

    #[test]
    fn test_marker_depths() {
        assert_eq!(heading_marker("== A ==").unwrap().1, 1);
        assert_eq!(heading_marker("=== B ===").unwrap().1, 2);
        assert_eq!(heading_marker("==== C ====").unwrap().1, 3);
    }
}

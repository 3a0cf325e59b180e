//! Document parsing.
//!
//! [`parse`] converts one raw article text into a [`Document`] in a single
//! pass over its lines. The text splits into a header (title line, `**Key:**
//! Value` metadata) and, after the first `---` separator, a body of summary
//! text and sections. Heading recognition is delegated to
//! [`classify`](crate::heading::classify); section keys to
//! [`normalize`](crate::key::normalize).

use std::{
    collections::{BTreeMap, HashMap},
    fs, mem,
    path::Path,
};

use chrono::Utc;

use crate::{
    Document, DocumentError, DocumentStats, Section, SectionRef, heading, key,
    metadata::parse_metadata_line, stats,
};

/// Metadata key promoted to `Document::query`.
const PROMOTED_QUERY: &str = "query";
/// Metadata key promoted to `Document::url`.
const PROMOTED_URL: &str = "url";
/// Metadata key promoted to `Document::format`.
const PROMOTED_FORMAT: &str = "extract_format";
/// Metadata key promoted to `Document::extracted_at`.
const PROMOTED_EXTRACTED: &str = "extracted_on";

/// What the parser is currently buffering content for.
#[derive(Debug)]
enum Open {
    /// No content line seen yet since the last boundary.
    Nothing,
    /// Buffering the document summary (content before any section).
    Summary,
    /// Buffering a titled section.
    Section {
        /// The heading text that opened this section.
        title: String,
        /// The heading level.
        level: u8,
    },
}

/// Parses raw article text into a document.
///
/// Total: malformed input degrades to an emptier document, never an error.
/// Everything before the first `---` line is header territory: the `#` title
/// line is skipped, metadata lines are collected, and all other lines are
/// ignored. Without a separator the entire input is header territory and the
/// body stays empty. After the separator, each recognized heading flushes the
/// buffered content into the summary (if no section was open) or a new
/// section; blank lines are dropped; the final buffer is flushed at end of
/// input. A heading that buffered no content attaches nothing.
pub fn parse(text: &str) -> Document {
    let lines: Vec<&str> = text.lines().collect();

    let mut document = Document {
        metadata: BTreeMap::new(),
        query: None,
        url: None,
        format: None,
        extracted_at: None,
        summary: String::new(),
        sections: HashMap::new(),
        section_hierarchy: Vec::new(),
        statistics: DocumentStats::default(),
        created_at: Utc::now(),
        updated_at: None,
        source_file: None,
    };

    let mut separator_seen = false;
    let mut open = Open::Nothing;
    let mut buffer: Vec<&str> = Vec::new();

    for (index, raw) in lines.iter().enumerate() {
        let line = raw.trim();

        if !separator_seen {
            if line == "---" {
                separator_seen = true;
            } else if line.starts_with('#') {
                // Document title line: neither metadata nor content.
            } else if let Some(entry) = parse_metadata_line(line) {
                promote(&mut document, &entry.key, &entry.value);
                document.metadata.insert(entry.key, entry.value);
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }

        // Only the first separator is significant; later `---` lines are
        // ordinary content and must not reach the classifier.
        if line != "---"
            && let Some(heading) = heading::classify(&lines, index)
        {
            flush(&mut document, &mut open, &mut buffer);
            open = Open::Section {
                title: heading.title,
                level: heading.level,
            };
            continue;
        }

        if matches!(open, Open::Nothing) {
            open = Open::Summary;
        }
        buffer.push(line);
    }

    flush(&mut document, &mut open, &mut buffer);

    document.statistics = stats::aggregate(&document);
    document
}

/// Reads and parses a file, recording its path as provenance.
pub fn parse_file(path: &Path) -> Result<Document, DocumentError> {
    let text = fs::read_to_string(path).map_err(|source| DocumentError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut document = parse(&text);
    document.source_file = Some(path.display().to_string());
    Ok(document)
}

/// Copies well-known metadata keys onto their promoted document fields.
fn promote(document: &mut Document, metadata_key: &str, value: &str) {
    let slot = match metadata_key {
        PROMOTED_QUERY => &mut document.query,
        PROMOTED_URL => &mut document.url,
        PROMOTED_FORMAT => &mut document.format,
        PROMOTED_EXTRACTED => &mut document.extracted_at,
        _ => return,
    };
    *slot = Some(value.to_string());
}

/// Flushes the buffered content at a section boundary.
///
/// Empty buffers attach nothing: a heading immediately followed by another
/// heading leaves no trace, matching the discard of empty sections.
fn flush(document: &mut Document, open: &mut Open, buffer: &mut Vec<&str>) {
    match mem::replace(open, Open::Nothing) {
        Open::Summary if !buffer.is_empty() => {
            document.summary = buffer.join("\n").trim().to_string();
        }
        Open::Section { title, level } if !buffer.is_empty() => {
            attach(document, &title, buffer, level);
        }
        _ => {}
    }
    buffer.clear();
}

/// Attaches a completed section to the document.
///
/// Computes the normalized key, resolves the parent via the
/// nearest-preceding-smaller-level rule, links the child into the parent's
/// `subsections` when the parent key is still present, appends to the
/// hierarchy log unconditionally, and inserts into `sections` (overwriting
/// on key collision).
fn attach(document: &mut Document, title: &str, content_lines: &[&str], level: u8) {
    let section_key = key::normalize(title);
    let content = content_lines.join("\n").trim().to_string();

    let mut section = Section {
        title: title.to_string(),
        level,
        word_count: content.split_whitespace().count(),
        character_count: content.chars().count(),
        content,
        parent_section: None,
        subsections: Vec::new(),
    };

    if level > 2
        && let Some(parent_key) = find_parent(&document.section_hierarchy, level)
    {
        section.parent_section = Some(parent_key.clone());
        if let Some(parent) = document.sections.get_mut(&parent_key) {
            parent.subsections.push(section_key.clone());
        }
    }

    document.section_hierarchy.push(SectionRef {
        key: section_key.clone(),
        title: title.to_string(),
        level,
    });
    document.sections.insert(section_key, section);
}

/// Finds the key of the nearest preceding hierarchy entry with a strictly
/// smaller level.
fn find_parent(hierarchy: &[SectionRef], level: u8) -> Option<String> {
    hierarchy
        .iter()
        .rev()
        .find(|entry| entry.level < level)
        .map(|entry| entry.key.clone())
}

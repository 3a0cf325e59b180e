//! Metadata line extraction.
//!
//! Article headers carry metadata as bold key/value lines ahead of the `---`
//! separator:
//!
//! ```markdown
//! # Malaria
//!
//! **Query:** Malaria
//!
//! **URL:** https://en.wikipedia.org/wiki/Malaria
//!
//! ---
//! ```
//!
//! Keys are lower-cased with spaces replaced by underscores, so `**Extract
//! Format:** wiki` becomes `extract_format`. Malformed lines yield nothing
//! and are ignored by the parser.

/// A single parsed `**Key:** Value` metadata line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataLine {
    /// Normalized key: lower-cased, spaces replaced by underscores.
    pub key: String,
    /// The raw value, trimmed.
    pub value: String,
}

/// Parses one header line of the form `**Key:** Value`.
///
/// Returns `None` when the line does not match the convention (no leading
/// `**`, no `:**` delimiter, or an empty key).
pub fn parse_metadata_line(line: &str) -> Option<MetadataLine> {
    let rest = line.trim().strip_prefix("**")?;
    let colon = rest.find(":**")?;
    if colon == 0 {
        return None;
    }

    let key = rest[..colon].trim().to_lowercase().replace(' ', "_");
    let value = rest[colon + 3..].trim().to_string();

    Some(MetadataLine { key, value })
}

//! Markdown rendering of fetched articles.
//!
//! The renderer produces exactly the layout the document parser consumes: a
//! `#` title line, `**Key:** Value` metadata, a `---` separator, the bare
//! summary text, then `##`-and-deeper section headings. The summary is
//! deliberately not given a heading of its own so that it parses into the
//! document's summary field rather than a section.

use chrono::{DateTime, Utc};

use crate::FetchedArticle;

/// Deepest markdown heading the renderer will emit.
const MAX_HEADING_HASHES: usize = 6;

/// Renders a fetched article into parser-ready markdown.
///
/// `topic` is the caller's original query, preserved verbatim in the
/// metadata so that lookups by query round-trip. Section depth `n` becomes
/// `n + 1` hashes, capped at [`MAX_HEADING_HASHES`].
pub fn render_markdown(
    topic: &str,
    article: &FetchedArticle,
    fetched_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", article.title));
    out.push_str(&format!("**Query:** {topic}\n\n"));
    out.push_str(&format!("**URL:** {}\n\n", article.url));
    out.push_str("**Extract Format:** wiki\n\n");
    out.push_str(&format!(
        "**Extracted on:** {}\n\n",
        fetched_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str("---\n\n");

    if !article.summary.is_empty() {
        out.push_str(&format!("{}\n\n", article.summary));
    }

    for section in &article.sections {
        let hashes =
            "#".repeat(usize::from(section.depth).saturating_add(1).min(MAX_HEADING_HASHES));
        out.push_str(&format!("{hashes} {}\n\n", section.title));
        if !section.text.is_empty() {
            out.push_str(&format!("{}\n\n", section.text));
        }
    }

    out
}

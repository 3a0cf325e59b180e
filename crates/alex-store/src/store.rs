//! The document store adapter.
//!
//! [`DocumentStore`] layers the domain operations — duplicate-aware upsert,
//! point and sectional lookup, listing, search, and collection statistics —
//! over any [`Collection`] backend. All lookup misses are `Ok(None)` or empty
//! vectors; errors only surface from the backend itself.

use alex_document::{Document, DocumentStats, Section, SectionRef, normalize};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    Collection, CollectionStats, DuplicateResolver, SearchMatch, SearchScope, StoreError,
    StoredDocument, UpsertMode, search, stats,
};

/// How many characters of the summary a listing preview shows.
const PREVIEW_CHARS: usize = 200;

/// Pseudo-section aliases that resolve to the document summary.
const SUMMARY_ALIASES: [&str; 2] = ["summary", "introduction"];

/// An abbreviated view of a stored document, for listings.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    /// Store identity.
    pub id: String,
    /// Document title (its query), or "Unknown".
    pub title: String,
    /// Source URL, empty when unknown.
    pub url: String,
    /// Leading characters of the summary, ellipsis-truncated.
    pub summary_preview: String,
    /// When the document was parsed.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated in place, if ever.
    pub updated_at: Option<DateTime<Utc>>,
    /// Per-document statistics, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<DocumentStats>,
    /// The heading log, when statistics were requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<SectionRef>>,
}

/// Domain operations over a document collection.
#[derive(Debug)]
pub struct DocumentStore<C> {
    /// The injected storage backend.
    collection: C,
}

impl<C: Collection> DocumentStore<C> {
    /// Wraps a collection backend.
    pub fn new(collection: C) -> Self {
        Self { collection }
    }

    /// Finds stored documents duplicating `document`.
    ///
    /// Matches by exact query first; only when that finds nothing does it
    /// fall back to an exact URL match. The strategies are not merged.
    pub fn find_duplicates(
        &self,
        document: &Document,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let snapshot = self.collection.all()?;

        if let Some(query) = document.effective_query() {
            let matches: Vec<StoredDocument> = snapshot
                .iter()
                .filter(|stored| stored.document.effective_query() == Some(query))
                .cloned()
                .collect();
            if !matches.is_empty() {
                return Ok(matches);
            }
        }

        if let Some(url) = document.effective_url() {
            return Ok(snapshot
                .into_iter()
                .filter(|stored| stored.document.effective_url() == Some(url))
                .collect());
        }

        Ok(Vec::new())
    }

    /// Stores a parsed document, resolving duplicates via `resolver`.
    ///
    /// Returns the identity the document ended up under, or `None` when the
    /// resolution was [`UpsertMode::Skip`]. The resolver is only consulted
    /// when duplicates exist; a duplicate-free document is simply inserted.
    pub fn store_document(
        &mut self,
        mut document: Document,
        resolver: &dyn DuplicateResolver,
    ) -> Result<Option<String>, StoreError> {
        let duplicates = self.find_duplicates(&document)?;

        if duplicates.is_empty() {
            let id = self.collection.insert(document)?;
            info!(%id, "stored new document");
            return Ok(Some(id));
        }

        match resolver.resolve(&document, &duplicates) {
            UpsertMode::Skip => {
                debug!("skipped duplicate document");
                Ok(None)
            }
            UpsertMode::Add => {
                let id = self.collection.insert(document)?;
                info!(%id, "stored duplicate as new document");
                Ok(Some(id))
            }
            UpsertMode::Update => {
                let existing = &duplicates[0];
                document.updated_at = Some(Utc::now());
                self.collection.replace(&existing.id, document)?;
                info!(id = %existing.id, "updated existing document");
                Ok(Some(existing.id.clone()))
            }
            UpsertMode::Overwrite => {
                for existing in &duplicates {
                    self.collection.remove(&existing.id)?;
                    debug!(id = %existing.id, "deleted duplicate document");
                }
                let id = self.collection.insert(document)?;
                info!(%id, "overwrote existing document(s)");
                Ok(Some(id))
            }
        }
    }

    /// Looks a document up by a case-insensitive substring of its query.
    ///
    /// Returns the first match in insertion order, or `None`.
    pub fn get_by_query(&self, query: &str) -> Result<Option<StoredDocument>, StoreError> {
        let needle = query.to_lowercase();
        Ok(self.collection.all()?.into_iter().find(|stored| {
            stored
                .document
                .effective_query()
                .is_some_and(|q| q.to_lowercase().contains(&needle))
        }))
    }

    /// Looks a document up by exact identity.
    pub fn get_by_id(&self, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        self.collection.get(id)
    }

    /// Resolves a section of the document matching `query`.
    ///
    /// Tries, in order: exact normalized-key match, case-insensitive title
    /// match, and finally the synthetic summary pseudo-section for the
    /// aliases "summary" and "introduction".
    pub fn get_section(
        &self,
        query: &str,
        name: &str,
    ) -> Result<Option<Section>, StoreError> {
        let Some(stored) = self.get_by_query(query)? else {
            return Ok(None);
        };
        let doc = stored.document;

        let section_key = normalize(name);
        if let Some(section) = doc.sections.get(&section_key) {
            return Ok(Some(section.clone()));
        }

        let lowered = name.to_lowercase();
        if let Some(section) = doc
            .sections
            .values()
            .find(|section| section.title.to_lowercase() == lowered)
        {
            return Ok(Some(section.clone()));
        }

        if SUMMARY_ALIASES.contains(&lowered.as_str()) {
            return Ok(Some(summary_section(&doc)));
        }

        Ok(None)
    }

    /// Lists every stored document as an abbreviated summary.
    pub fn list_documents(
        &self,
        include_stats: bool,
    ) -> Result<Vec<DocumentSummary>, StoreError> {
        Ok(self
            .collection
            .all()?
            .into_iter()
            .map(|stored| summarize(&stored, include_stats))
            .collect())
    }

    /// Searches document content for `term` within `scope`.
    pub fn search(
        &self,
        term: &str,
        scope: SearchScope,
    ) -> Result<Vec<SearchMatch>, StoreError> {
        Ok(search::search_documents(&self.collection.all()?, term, scope))
    }

    /// Aggregates statistics across the whole collection.
    pub fn collection_stats(&self) -> Result<CollectionStats, StoreError> {
        Ok(stats::aggregate(&self.collection.all()?))
    }

    /// Returns the number of stored documents.
    pub fn count(&self) -> Result<usize, StoreError> {
        self.collection.count()
    }
}

/// Builds the synthetic summary pseudo-section for a document.
fn summary_section(doc: &Document) -> Section {
    Section {
        title: "Summary".to_string(),
        content: doc.summary.clone(),
        level: 1,
        word_count: doc.summary.split_whitespace().count(),
        character_count: doc.summary.chars().count(),
        parent_section: None,
        subsections: Vec::new(),
    }
}

/// Builds the abbreviated listing view of one stored document.
fn summarize(stored: &StoredDocument, include_stats: bool) -> DocumentSummary {
    let doc = &stored.document;

    let preview: String = doc.summary.chars().take(PREVIEW_CHARS).collect();
    let preview = if doc.summary.chars().count() > PREVIEW_CHARS {
        format!("{preview}...")
    } else {
        preview
    };

    DocumentSummary {
        id: stored.id.clone(),
        title: doc.effective_query().unwrap_or("Unknown").to_string(),
        url: doc.effective_url().unwrap_or_default().to_string(),
        summary_preview: preview,
        created_at: doc.created_at,
        updated_at: doc.updated_at,
        stats: include_stats.then_some(doc.statistics),
        sections: include_stats.then(|| doc.section_hierarchy.clone()),
    }
}

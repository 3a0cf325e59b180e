//! Operation routing.
//!
//! [`Dispatcher`] is the external-facing surface of the system: it routes an
//! operation name to the store, falls back to the fetch collaborator on a
//! cache miss, and never lets a collaborator failure escape — every outcome
//! is a [`QueryResponse`].

use std::collections::HashSet;

use alex_document::{Document, parse};
use alex_fetch::Fetcher;
use alex_store::{Collection, DefaultResolver, DocumentStore, StoreError, StoredDocument};
use tracing::{debug, warn};

use crate::{
    DocumentInfo, Operation, QueryData, QueryRequest, QueryResponse, SectionEntry,
    SectionsPayload,
};

/// Routes operations against a store, fetching externally on cache misses.
#[derive(Debug)]
pub struct Dispatcher<C, F> {
    /// The document store adapter.
    store: DocumentStore<C>,
    /// The external fetch collaborator.
    fetcher: F,
}

impl<C: Collection, F: Fetcher> Dispatcher<C, F> {
    /// Builds a dispatcher over a store and a fetcher.
    pub fn new(store: DocumentStore<C>, fetcher: F) -> Self {
        Self { store, fetcher }
    }

    /// The underlying store, for callers that ingest documents directly.
    pub fn store_mut(&mut self) -> &mut DocumentStore<C> {
        &mut self.store
    }

    /// Runs one operation to completion.
    ///
    /// Never returns an error: store and fetch failures are converted into
    /// an error-status envelope.
    pub fn query(&mut self, request: &QueryRequest) -> QueryResponse {
        let mut response = QueryResponse::begin(request);

        let outcome = match request.operation {
            Operation::ListDocuments => self.list_documents(request, &mut response),
            Operation::GetStatistics => self.statistics(&mut response),
            Operation::SearchContent => self.search_content(request, &mut response),
            Operation::FetchDocument => self.fetch_document(request, &mut response),
            Operation::FetchSections => self.fetch_sections(request, &mut response),
        };

        if let Err(err) = outcome {
            warn!(operation = %request.operation, error = %err, "operation failed");
            response.fail(err.to_string());
        }
        response
    }

    /// Handles [`Operation::ListDocuments`].
    fn list_documents(
        &mut self,
        request: &QueryRequest,
        response: &mut QueryResponse,
    ) -> Result<(), StoreError> {
        let mut documents = self.store.list_documents(true)?;
        response.metadata.database_checked = true;

        response.metadata.limited = Some(documents.len() > request.limit);
        documents.truncate(request.limit);
        response.metadata.total_found = Some(documents.len());
        response.data = Some(QueryData::Documents(documents));
        Ok(())
    }

    /// Handles [`Operation::GetStatistics`].
    fn statistics(&mut self, response: &mut QueryResponse) -> Result<(), StoreError> {
        let stats = self.store.collection_stats()?;
        response.metadata.database_checked = true;
        response.data = Some(QueryData::Statistics(stats));
        Ok(())
    }

    /// Handles [`Operation::SearchContent`].
    fn search_content(
        &mut self,
        request: &QueryRequest,
        response: &mut QueryResponse,
    ) -> Result<(), StoreError> {
        let mut matches = self.store.search(&request.topic, request.scope)?;
        response.metadata.database_checked = true;

        response.metadata.limited = Some(matches.len() > request.limit);
        matches.truncate(request.limit);
        response.metadata.total_matches = Some(matches.len());
        response.metadata.search_scope = Some(request.scope);
        response.data = Some(QueryData::Matches(matches));
        Ok(())
    }

    /// Handles [`Operation::FetchDocument`].
    fn fetch_document(
        &mut self,
        request: &QueryRequest,
        response: &mut QueryResponse,
    ) -> Result<(), StoreError> {
        let Some(stored) = self.resolve_document(request, response)? else {
            return Ok(());
        };

        response.metadata.sections_count = Some(stored.document.sections.len());
        response.data = Some(QueryData::Document(Box::new(stored)));
        Ok(())
    }

    /// Handles [`Operation::FetchSections`].
    fn fetch_sections(
        &mut self,
        request: &QueryRequest,
        response: &mut QueryResponse,
    ) -> Result<(), StoreError> {
        let Some(stored) = self.resolve_document(request, response)? else {
            return Ok(());
        };

        let payload = sections_payload(
            &stored.document,
            request.section_filter.as_deref(),
            request.limit,
        );
        response.metadata.sections_returned = Some(payload.sections.len());
        response.metadata.section_filter = request.section_filter.clone();
        response.data = Some(QueryData::Sections(payload));
        Ok(())
    }

    /// Resolves a document for the fetch operations: store first, then one
    /// external fetch, then the store again.
    ///
    /// Returns `None` after marking the response as failed when neither
    /// source has the topic.
    fn resolve_document(
        &mut self,
        request: &QueryRequest,
        response: &mut QueryResponse,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let mut stored = self.store.get_by_query(&request.topic)?;
        response.metadata.database_checked = true;

        if stored.is_some() {
            debug!(topic = %request.topic, "serving from store");
            response.metadata.cached = true;
        } else {
            debug!(topic = %request.topic, "store miss, fetching externally");
            match self.fetcher.fetch(&request.topic) {
                Some(raw) => {
                    let document = parse(&raw);
                    self.store.store_document(document, &DefaultResolver)?;
                    response.metadata.wikipedia_fetched = true;
                    stored = self.store.get_by_query(&request.topic)?;
                }
                None => {
                    response.fail(format!(
                        "could not retrieve information for: {}",
                        request.topic
                    ));
                    return Ok(None);
                }
            }
        }

        if stored.is_none() {
            response.fail(format!(
                "could not retrieve information for: {}",
                request.topic
            ));
        }
        Ok(stored)
    }
}

/// Builds the sections payload for one document.
///
/// Sections follow hierarchy order with collision keys deduplicated; the
/// filter is a case-insensitive substring match on titles; the summary is
/// omitted whenever a filter is active.
fn sections_payload(
    document: &Document,
    filter: Option<&str>,
    limit: usize,
) -> SectionsPayload {
    let filter_lower = filter.map(str::to_lowercase);
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for entry in &document.section_hierarchy {
        if !seen.insert(entry.key.as_str()) {
            continue;
        }
        let Some(section) = document.sections.get(&entry.key) else {
            continue;
        };
        if let Some(needle) = &filter_lower
            && !section.title.to_lowercase().contains(needle)
        {
            continue;
        }
        entries.push(SectionEntry {
            key: entry.key.clone(),
            section: section.clone(),
        });
    }
    entries.truncate(limit);

    SectionsPayload {
        document_info: DocumentInfo {
            title: document.effective_query().unwrap_or("Unknown").to_string(),
            url: document.effective_url().unwrap_or_default().to_string(),
            summary: if filter.is_some() {
                None
            } else {
                Some(document.summary.clone())
            },
        },
        sections: entries,
    }
}

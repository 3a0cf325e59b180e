//! Request and response types for the dispatcher.
//!
//! Every operation returns the same envelope: a status, the echoed
//! operation and topic, the operation's payload, and metadata describing
//! where the answer came from (store hit, external fetch, or both).

use std::{fmt, str::FromStr};

use alex_document::Section;
use alex_store::{CollectionStats, DocumentSummary, SearchMatch, SearchScope, StoredDocument};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default maximum number of results returned by an operation.
pub const DEFAULT_LIMIT: usize = 10;

/// The operations the dispatcher routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Return one full document, fetching and storing it on a store miss.
    FetchDocument,
    /// Return a document's sections, optionally filtered by title.
    FetchSections,
    /// List stored documents.
    ListDocuments,
    /// Search stored content.
    SearchContent,
    /// Report collection statistics.
    GetStatistics,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FetchDocument => "fetch_document",
            Self::FetchSections => "fetch_sections",
            Self::ListDocuments => "list_documents",
            Self::SearchContent => "search_content",
            Self::GetStatistics => "get_statistics",
        };
        f.write_str(name)
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fetch_document" => Ok(Self::FetchDocument),
            "fetch_sections" => Ok(Self::FetchSections),
            "list_documents" => Ok(Self::ListDocuments),
            "search_content" => Ok(Self::SearchContent),
            "get_statistics" => Ok(Self::GetStatistics),
            other => Err(format!("unknown operation: {other}")),
        }
    }
}

/// One dispatcher call.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    /// The topic, search term, or query text, depending on the operation.
    pub topic: String,
    /// Which operation to run.
    pub operation: Operation,
    /// Case-insensitive section-title filter for
    /// [`Operation::FetchSections`].
    pub section_filter: Option<String>,
    /// Field scope for [`Operation::SearchContent`].
    pub scope: SearchScope,
    /// Maximum results to return.
    pub limit: usize,
}

impl QueryRequest {
    /// Builds a request with default filter, scope, and limit.
    pub fn new(topic: impl Into<String>, operation: Operation) -> Self {
        Self {
            topic: topic.into(),
            operation,
            section_filter: None,
            scope: SearchScope::All,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Whether an operation succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    /// The operation produced a payload.
    Success,
    /// The operation failed; see the envelope's `error` field.
    Error,
}

/// Provenance and sizing metadata attached to every response.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponseMetadata {
    /// Whether the store was consulted.
    pub database_checked: bool,
    /// Whether the external fetcher was invoked.
    pub wikipedia_fetched: bool,
    /// Whether the answer came from the store without fetching.
    pub cached: bool,
    /// Whether `limit` truncated the result set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limited: Option<bool>,
    /// Listing result count, after truncation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_found: Option<usize>,
    /// Search result count, after truncation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_matches: Option<usize>,
    /// The scope a search ran under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_scope: Option<SearchScope>,
    /// Section count of a fetched document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections_count: Option<usize>,
    /// Number of sections returned by a sections fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections_returned: Option<usize>,
    /// The active section-title filter, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_filter: Option<String>,
}

/// Operation payloads.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QueryData {
    /// A full stored document.
    Document(Box<StoredDocument>),
    /// A filtered view of one document's sections.
    Sections(SectionsPayload),
    /// Abbreviated document listings.
    Documents(Vec<DocumentSummary>),
    /// Search results with highlighted excerpts.
    Matches(Vec<SearchMatch>),
    /// Collection-wide statistics.
    Statistics(CollectionStats),
}

/// The payload of a sections fetch.
#[derive(Debug, Clone, Serialize)]
pub struct SectionsPayload {
    /// Abbreviated info about the owning document.
    pub document_info: DocumentInfo,
    /// The selected sections, in document order.
    pub sections: Vec<SectionEntry>,
}

/// Abbreviated document info accompanying a sections fetch.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentInfo {
    /// Document title (its query), or "Unknown".
    pub title: String,
    /// Source URL, empty when unknown.
    pub url: String,
    /// The document summary; omitted when a section filter is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// One section in a sections payload, carrying its map key.
#[derive(Debug, Clone, Serialize)]
pub struct SectionEntry {
    /// The section's normalized key.
    pub key: String,
    /// The section itself.
    #[serde(flatten)]
    pub section: Section,
}

/// The envelope every dispatcher call returns.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    /// Success or error.
    pub status: QueryStatus,
    /// The operation that ran.
    pub operation: Operation,
    /// The topic or term the request carried.
    pub query: String,
    /// The operation's payload, absent on error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<QueryData>,
    /// Provenance and sizing metadata.
    pub metadata: ResponseMetadata,
    /// Error message, present only when `status` is `Error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the response was produced.
    pub timestamp: DateTime<Utc>,
}

impl QueryResponse {
    /// Starts a successful, payload-less response for a request.
    pub(crate) fn begin(request: &QueryRequest) -> Self {
        Self {
            status: QueryStatus::Success,
            operation: request.operation,
            query: request.topic.clone(),
            data: None,
            metadata: ResponseMetadata::default(),
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// Marks the response as failed with a message.
    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.status = QueryStatus::Error;
        self.error = Some(message.into());
        self.data = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_round_trips_through_str() {
        for op in [
            Operation::FetchDocument,
            Operation::FetchSections,
            Operation::ListDocuments,
            Operation::SearchContent,
            Operation::GetStatistics,
        ] {
            assert_eq!(op.to_string().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_unknown_operation() {
        assert!("drop_database".parse::<Operation>().is_err());
    }

    #[test]
    fn test_metadata_omits_unset_fields() {
        let serialized = serde_json::to_value(ResponseMetadata::default()).unwrap();
        let object = serialized.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(object.contains_key("database_checked"));
        assert!(object.contains_key("wikipedia_fetched"));
        assert!(object.contains_key("cached"));
    }

    #[test]
    fn test_envelope_serialization() {
        let mut response = QueryResponse::begin(&QueryRequest::new(
            "Malaria",
            Operation::GetStatistics,
        ));
        response.fail("store unreachable");

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["operation"], "get_statistics");
        assert_eq!(value["error"], "store unreachable");
        assert!(value.get("data").is_none());
    }
}

//! Query dispatching for alex.
//!
//! The [`Dispatcher`] is the operation router the conversational and CLI
//! front ends call: it answers from the document store when it can, invokes
//! the external fetch collaborator on a cache miss, and wraps every outcome
//! — including collaborator failures — in a structured [`QueryResponse`].
//!
//! # Example
//!
//! ```
//! use alex_query::{Dispatcher, Operation, QueryRequest};
//! use alex_store::{DocumentStore, MemoryCollection};
//!
//! struct NoFetch;
//! impl alex_fetch::Fetcher for NoFetch {
//!     fn fetch(&self, _topic: &str) -> Option<String> {
//!         None
//!     }
//! }
//!
//! let mut dispatcher =
//!     Dispatcher::new(DocumentStore::new(MemoryCollection::new()), NoFetch);
//! let response = dispatcher.query(&QueryRequest::new("", Operation::GetStatistics));
//! assert!(response.metadata.database_checked);
//! ```

#![warn(missing_docs)]

mod dispatch;
mod response;

pub use dispatch::Dispatcher;
pub use response::{
    DEFAULT_LIMIT, DocumentInfo, Operation, QueryData, QueryRequest, QueryResponse, QueryStatus,
    ResponseMetadata, SectionEntry, SectionsPayload,
};

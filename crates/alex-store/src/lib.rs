//! Document storage and querying for alex.
//!
//! This crate persists parsed [`alex_document::Document`]s and answers the
//! queries the dispatcher needs:
//! - duplicate-aware upsert with a pluggable [`DuplicateResolver`] strategy
//! - point lookup by query substring or identity
//! - sectional lookup with a synthetic summary pseudo-section
//! - scoped content search with highlighted excerpts
//! - collection-wide statistics
//!
//! Storage itself is behind the [`Collection`] trait so the adapter logic
//! runs against [`MemoryCollection`] in tests and [`FileCollection`] in
//! production.

#![warn(missing_docs)]

mod collection;
mod dedup;
mod error;
mod file;
mod memory;
mod search;
mod stats;
mod store;

pub use collection::{Collection, StoredDocument};
pub use dedup::{DefaultResolver, DuplicateResolver, FixedResolver, UpsertMode};
pub use error::StoreError;
pub use file::FileCollection;
pub use memory::MemoryCollection;
pub use search::{FieldMatch, SearchMatch, SearchScope, search_documents};
pub use stats::{CollectionStats, aggregate};
pub use store::{DocumentStore, DocumentSummary};

//! Storage capability for document collections.
//!
//! The [`Collection`] trait defines the minimal surface the store adapter
//! needs from a backend: identity-assigning insert, replace/remove by
//! identity, point lookup, and a full scan. Keeping the trait this small lets
//! the adapter's query, dedup, and search logic run unchanged against the
//! in-memory implementation in tests and the file-backed one in production.

use alex_document::Document;
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// A document together with its store-assigned identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Store-assigned identifier, stable across updates.
    pub id: String,
    /// The document itself.
    pub document: Document,
}

/// Abstract storage backend for a document collection.
///
/// Implementations preserve insertion order in [`all`](Collection::all) and
/// assign a fresh identity on every [`insert`](Collection::insert).
pub trait Collection {
    /// Inserts a document and returns its newly assigned identity.
    fn insert(&mut self, document: Document) -> Result<String, StoreError>;

    /// Replaces the document with the given identity in place.
    ///
    /// Returns `false` when no document has that identity.
    fn replace(&mut self, id: &str, document: Document) -> Result<bool, StoreError>;

    /// Removes the document with the given identity.
    ///
    /// Returns `false` when no document has that identity.
    fn remove(&mut self, id: &str) -> Result<bool, StoreError>;

    /// Looks up a document by identity.
    fn get(&self, id: &str) -> Result<Option<StoredDocument>, StoreError>;

    /// Returns every stored document in insertion order.
    fn all(&self) -> Result<Vec<StoredDocument>, StoreError>;

    /// Returns the number of stored documents.
    fn count(&self) -> Result<usize, StoreError>;
}

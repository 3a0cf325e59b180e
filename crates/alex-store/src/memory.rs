//! In-memory [`Collection`] implementation.
//!
//! Backs the adapter in tests and in ephemeral runs. Documents live in a
//! `Vec` so insertion order is the scan order, matching the file-backed
//! implementation.

use alex_document::Document;
use uuid::Uuid;

use crate::{Collection, StoreError, StoredDocument};

/// A volatile, insertion-ordered document collection.
#[derive(Debug, Default)]
pub struct MemoryCollection {
    /// Stored documents in insertion order.
    entries: Vec<StoredDocument>,
}

impl MemoryCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collection for MemoryCollection {
    fn insert(&mut self, document: Document) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.entries.push(StoredDocument {
            id: id.clone(),
            document,
        });
        Ok(id)
    }

    fn replace(&mut self, id: &str, document: Document) -> Result<bool, StoreError> {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.document = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        Ok(self.entries.len() < before)
    }

    fn get(&self, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        Ok(self.entries.iter().find(|entry| entry.id == id).cloned())
    }

    fn all(&self) -> Result<Vec<StoredDocument>, StoreError> {
        Ok(self.entries.clone())
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use alex_document::parse;

    use super::*;

    #[test]
    fn test_insert_assigns_distinct_ids() {
        let mut collection = MemoryCollection::new();
        let first = collection.insert(parse("")).unwrap();
        let second = collection.insert(parse("")).unwrap();

        assert_ne!(first, second);
        assert_eq!(collection.count().unwrap(), 2);
    }

    #[test]
    fn test_replace_preserves_identity() {
        let mut collection = MemoryCollection::new();
        let id = collection.insert(parse("")).unwrap();

        let mut updated = parse("");
        updated.query = Some("Updated".into());
        assert!(collection.replace(&id, updated).unwrap());

        let stored = collection.get(&id).unwrap().unwrap();
        assert_eq!(stored.document.query.as_deref(), Some("Updated"));
    }

    #[test]
    fn test_replace_missing_id() {
        let mut collection = MemoryCollection::new();
        assert!(!collection.replace("no-such-id", parse("")).unwrap());
    }

    #[test]
    fn test_remove() {
        let mut collection = MemoryCollection::new();
        let id = collection.insert(parse("")).unwrap();

        assert!(collection.remove(&id).unwrap());
        assert!(!collection.remove(&id).unwrap());
        assert_eq!(collection.count().unwrap(), 0);
    }

    #[test]
    fn test_all_preserves_insertion_order() {
        let mut collection = MemoryCollection::new();
        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(collection.insert(parse("")).unwrap());
        }

        let scanned: Vec<String> = collection
            .all()
            .unwrap()
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        assert_eq!(scanned, ids);
    }
}

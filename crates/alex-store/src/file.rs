//! File-backed [`Collection`] implementation.
//!
//! The collection is a single JSON file holding every stored document in
//! insertion order. The file is loaded once at open and rewritten after each
//! mutation; a missing file opens as an empty collection. This trades write
//! amplification for a durable store that other tooling can read directly.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use alex_document::Document;
use tracing::debug;
use uuid::Uuid;

use crate::{Collection, StoreError, StoredDocument};

/// A JSON-file-backed, insertion-ordered document collection.
#[derive(Debug)]
pub struct FileCollection {
    /// Path of the backing JSON file.
    path: PathBuf,
    /// In-memory copy of the stored documents.
    entries: Vec<StoredDocument>,
}

impl FileCollection {
    /// Opens the collection at `path`, loading existing documents.
    ///
    /// A missing file yields an empty collection; a file that exists but
    /// cannot be parsed is an error rather than silent data loss.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
                path: path.clone(),
                message: e.to_string(),
            })?
        } else {
            Vec::new()
        };

        debug!(path = %path.display(), documents = entries.len(), "opened collection");
        Ok(Self { path, entries })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrites the backing file from the in-memory state.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        }

        let contents = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            StoreError::Io {
                path: self.path.clone(),
                source: io::Error::new(io::ErrorKind::InvalidData, e.to_string()),
            }
        })?;

        fs::write(&self.path, contents).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl Collection for FileCollection {
    fn insert(&mut self, document: Document) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.entries.push(StoredDocument {
            id: id.clone(),
            document,
        });
        self.save()?;
        Ok(id)
    }

    fn replace(&mut self, id: &str, document: Document) -> Result<bool, StoreError> {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) else {
            return Ok(false);
        };
        entry.document = document;
        self.save()?;
        Ok(true)
    }

    fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
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
    fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let collection = FileCollection::open(dir.path().join("documents.json")).unwrap();
        assert_eq!(collection.count().unwrap(), 0);
    }

    #[test]
    fn test_documents_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");

        let id = {
            let mut collection = FileCollection::open(&path).unwrap();
            let mut doc = parse("");
            doc.query = Some("Malaria".into());
            collection.insert(doc).unwrap()
        };

        let reopened = FileCollection::open(&path).unwrap();
        let stored = reopened.get(&id).unwrap().unwrap();
        assert_eq!(stored.document.query.as_deref(), Some("Malaria"));
    }

    #[test]
    fn test_parent_directories_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("documents.json");

        let mut collection = FileCollection::open(&path).unwrap();
        collection.insert(parse("")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");
        fs::write(&path, "not json").unwrap();

        let err = FileCollection::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");

        let mut collection = FileCollection::open(&path).unwrap();
        let id = collection.insert(parse("")).unwrap();
        assert!(collection.remove(&id).unwrap());

        let reopened = FileCollection::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 0);
    }
}

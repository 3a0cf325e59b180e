//! Error types for the alex-store crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when working with a document collection.
///
/// Lookup misses are not errors: every query operation returns `Ok(None)`
/// or an empty vector when nothing matches.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read or write the backing store file.
    #[error("failed to access store file {path}: {source}")]
    Io {
        /// Path to the collection file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The backing store file could not be encoded or decoded.
    #[error("invalid store file {path}: {message}")]
    Corrupt {
        /// Path to the collection file.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}

//! Error types for article fetching.

use thiserror::Error;

/// Errors that can occur while fetching an article.
///
/// These never cross the [`Fetcher`](crate::Fetcher) trait boundary; the
/// trait implementation logs them and returns `None`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request failed (connection, TLS, timeout).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("wikipedia returned status {0}")]
    Status(reqwest::StatusCode),

    /// The API response did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

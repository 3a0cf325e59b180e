//! alex: encyclopedia articles, parsed, stored, and queried.
//!
//! alex fetches Wikipedia articles, parses them into hierarchical section
//! trees, keeps them in a local document collection, and answers lookup,
//! sectional, and full-text queries over that collection — from the command
//! line or from a conversational tool layer driving the dispatcher directly.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod prompt;

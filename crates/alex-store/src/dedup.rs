//! Duplicate resolution policy.
//!
//! When an incoming document matches existing ones (same query, or failing
//! that, same URL), the store asks a [`DuplicateResolver`] what to do. The
//! resolver is a strategy injected by the caller: interactive front ends
//! prompt the user, batch callers pin a mode, and the non-interactive
//! default updates in place. Keeping the side-effecting prompt behind this
//! trait leaves the upsert logic deterministic and testable.

use std::{fmt, str::FromStr};

use alex_document::Document;
use serde::{Deserialize, Serialize};

use crate::StoredDocument;

/// What to do with an incoming document that has duplicates in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertMode {
    /// Do nothing; the incoming document is discarded.
    Skip,
    /// Insert as a new document despite the duplicates.
    Add,
    /// Replace the first duplicate in place, keeping its identity.
    Update,
    /// Delete every duplicate, then insert as a new document.
    Overwrite,
}

impl fmt::Display for UpsertMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Skip => "skip",
            Self::Add => "add",
            Self::Update => "update",
            Self::Overwrite => "overwrite",
        };
        f.write_str(name)
    }
}

impl FromStr for UpsertMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "add" => Ok(Self::Add),
            "update" => Ok(Self::Update),
            "overwrite" => Ok(Self::Overwrite),
            other => Err(format!(
                "unknown duplicate mode '{other}' (expected skip, add, update, or overwrite)"
            )),
        }
    }
}

/// Strategy deciding how to handle duplicates of an incoming document.
///
/// Only consulted when at least one duplicate exists.
pub trait DuplicateResolver {
    /// Picks an [`UpsertMode`] for `incoming` given its duplicates.
    fn resolve(&self, incoming: &Document, existing: &[StoredDocument]) -> UpsertMode;
}

/// The non-interactive default policy: update the first duplicate in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

impl DuplicateResolver for DefaultResolver {
    fn resolve(&self, _incoming: &Document, _existing: &[StoredDocument]) -> UpsertMode {
        UpsertMode::Update
    }
}

/// A resolver that always answers with a fixed mode.
#[derive(Debug, Clone, Copy)]
pub struct FixedResolver(pub UpsertMode);

impl DuplicateResolver for FixedResolver {
    fn resolve(&self, _incoming: &Document, _existing: &[StoredDocument]) -> UpsertMode {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trips_through_str() {
        for mode in [
            UpsertMode::Skip,
            UpsertMode::Add,
            UpsertMode::Update,
            UpsertMode::Overwrite,
        ] {
            assert_eq!(mode.to_string().parse::<UpsertMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_mode_parse_is_case_insensitive() {
        assert_eq!("OVERWRITE".parse::<UpsertMode>().unwrap(), UpsertMode::Overwrite);
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        assert!("merge".parse::<UpsertMode>().is_err());
    }

    #[test]
    fn test_default_resolver_updates() {
        let doc = alex_document::parse("");
        assert_eq!(DefaultResolver.resolve(&doc, &[]), UpsertMode::Update);
    }
}

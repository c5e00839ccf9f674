//! Precedence merging of document values over an existing environment.
//!
//! A document value is written when its key is not set yet. A key that is
//! already set keeps its value unless the document is preferred.

use crate::env::FlatMap;
use tracing::debug;

/// Which side wins when a key is both set and provided by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precedence {
    /// Keep the value already in the environment (no override).
    #[default]
    PreferExisting,
    /// Replace the value with the document's (override).
    PreferDocument,
}

impl From<bool> for Precedence {
    fn from(override_existing: bool) -> Self {
        if override_existing {
            Precedence::PreferDocument
        } else {
            Precedence::PreferExisting
        }
    }
}

impl std::fmt::Display for Precedence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Precedence::PreferExisting => write!(f, "prefer-existing"),
            Precedence::PreferDocument => write!(f, "prefer-document"),
        }
    }
}

/// Result of merging candidates into a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Entries that must be written to the environment.
    pub writes: FlatMap,
    /// Every key of the snapshot and the candidates with its winning value.
    pub effective: FlatMap,
}

/// Merge rendered `candidates` over `existing`.
pub fn merge(existing: &FlatMap, candidates: FlatMap, precedence: Precedence) -> MergeOutcome {
    let mut effective = existing.clone();
    let mut writes = FlatMap::new();

    for (key, value) in candidates {
        match existing.get(&key) {
            Some(_) if precedence == Precedence::PreferExisting => {
                debug!(key = %key, "Keeping existing value");
                continue;
            }
            Some(_) => debug!(key = %key, "Overriding existing value"),
            None => debug!(key = %key, "Setting new value"),
        }
        effective.insert(key.clone(), value.clone());
        writes.insert(key, value);
    }

    MergeOutcome { writes, effective }
}

//! In-memory deduplication store.
//!
//! Maps each arXiv identifier to the set of record variants seen for it
//! (the original announcement plus any revisions). Two records are the same
//! variant when their `(timestamp, identifier)` pairs agree.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::Record;

/// Result of merging a record into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// A previously unknown variant of a new article.
    New,
    /// A previously unknown variant announced as a revision.
    Revision,
    /// This exact variant was already stored; nothing changed.
    Repeated,
}

/// Identifier-keyed collection of known record variants.
///
/// Not internally synchronized: callers that share a store across threads
/// must serialize access themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordStore {
    variants: BTreeMap<String, BTreeSet<Record>>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a record, reporting whether it was new, a revision, or a repeat.
    pub fn merge(&mut self, record: Record) -> MergeOutcome {
        let variants = self.variants.entry(record.identifier.clone()).or_default();
        if variants.contains(&record) {
            return MergeOutcome::Repeated;
        }
        let outcome = if record.is_revision {
            MergeOutcome::Revision
        } else {
            MergeOutcome::New
        };
        variants.insert(record);
        outcome
    }

    /// Whether this exact variant is already stored.
    pub fn contains(&self, record: &Record) -> bool {
        self.variants
            .get(&record.identifier)
            .is_some_and(|variants| variants.contains(record))
    }

    /// All variants of an identifier, oldest first.
    pub fn get(&self, identifier: &str) -> Option<&BTreeSet<Record>> {
        self.variants.get(identifier)
    }

    /// Most recent variant of an identifier.
    pub fn latest(&self, identifier: &str) -> Option<&Record> {
        self.variants.get(identifier).and_then(|v| v.last())
    }

    /// Iterate identifiers with their variants, in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<Record>)> {
        self.variants.iter().map(|(id, v)| (id.as_str(), v))
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Number of stored variants across all identifiers.
    pub fn variant_count(&self) -> usize {
        self.variants.values().map(BTreeSet::len).sum()
    }

    /// Number of stored variants announced as revisions.
    pub fn revision_count(&self) -> usize {
        self.variants
            .values()
            .flat_map(|v| v.iter())
            .filter(|r| r.is_revision)
            .count()
    }
}

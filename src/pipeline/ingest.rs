// src/pipeline/ingest.rs

//! Digest ingestion: parse, validate, and merge into a record store.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::InvalidReason;
use crate::models::Record;
use crate::services::{parser, validator};
use crate::storage::{MergeOutcome, RecordStore};

/// Counters for one ingested digest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Blocks found in the digest
    pub total: usize,
    /// Valid records not seen before, announced as new
    pub new: usize,
    /// Valid records not seen before, announced as revisions
    pub revisions: usize,
    /// Blocks rejected by validation
    pub invalid: usize,
    /// Valid records already present in the store
    pub repeated: usize,
    /// Rejected blocks by reason
    pub invalid_reasons: BTreeMap<InvalidReason, usize>,
}

impl fmt::Display for ParseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries total, {} new, {} revisions ({} invalid, {} repeated)",
            self.total, self.new, self.revisions, self.invalid, self.repeated
        )
    }
}

/// Records surfaced by one ingestion, with its counters.
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    /// Newly merged records, most recent first
    pub records: Vec<Record>,
    pub summary: ParseSummary,
}

/// Parse a digest and merge its valid records into `store`.
///
/// Only records that were new to the store are returned; a record repeated
/// within the digest is surfaced once, at its first occurrence.
pub fn ingest(raw: &str, store: &mut RecordStore) -> IngestOutcome {
    let mut outcome = IngestOutcome::default();

    for block in parser::parse_blocks(raw) {
        outcome.summary.total += 1;
        let record = match validator::validate(block) {
            Ok(record) => record,
            Err(reason) => {
                log::debug!("Ignoring invalid entry: {}", reason);
                outcome.summary.invalid += 1;
                *outcome.summary.invalid_reasons.entry(reason).or_default() += 1;
                continue;
            }
        };

        if store.contains(&record) {
            log::debug!("Skipping repeated entry arXiv:{}", record.identifier);
            outcome.summary.repeated += 1;
            continue;
        }
        match store.merge(record.clone()) {
            MergeOutcome::New => outcome.summary.new += 1,
            MergeOutcome::Revision => outcome.summary.revisions += 1,
            MergeOutcome::Repeated => continue,
        }
        outcome.records.push(record);
    }

    outcome.records.sort_by(|a, b| b.cmp(a));
    log::info!("{}", outcome.summary);
    outcome
}

/// Alias of [`ingest`] under the digest-oriented name.
pub fn parse_announcement(raw: &str, store: &mut RecordStore) -> IngestOutcome {
    ingest(raw, store)
}

//! Pipeline entry points for reader operations.
//!
//! - `ingest`: Parse a digest and merge its records into a store
//! - `run_report`: Fetch, ingest, classify, and write an HTML report

pub mod ingest;
pub mod report;

pub use ingest::{IngestOutcome, ParseSummary, ingest, parse_announcement};
pub use report::{ReportOutcome, run_report};

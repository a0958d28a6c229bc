//! Record storage.
//!
//! - [`RecordStore`]: the in-memory deduplication store that a batch merges
//!   records into.
//! - [`ArchiveStorage`]: persistence of a store between runs, so that repeated
//!   runs accumulate a growing archive instead of starting empty.
//!
//! ## Archive Layout
//!
//! ```text
//! archive.json              # {"<arXiv id>": [<record>, <revision>, ...], ...}
//! ```

pub mod local;
pub mod store;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalArchive;
pub use store::{MergeOutcome, RecordStore};

/// Trait for archive backends.
pub trait ArchiveStorage {
    /// Load the stored archive. A missing archive loads as an empty store.
    fn load(&self) -> Result<RecordStore>;

    /// Replace the stored archive with `store`.
    fn save(&self, store: &RecordStore) -> Result<()>;
}

// src/models/mod.rs

//! Domain models for the news reader.
//!
//! This module contains the data structures shared across the application,
//! organized by their primary purpose.

mod config;
mod interests;
mod record;

// Re-export all public types
pub use config::{ArchiveConfig, Config, InterestsConfig, LoggingConfig, ReaderConfig};
pub use interests::InterestLists;
pub use record::{RawRecord, Record, field};

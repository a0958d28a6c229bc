//! Service layer for the news reader.
//!
//! This module contains the business logic for:
//! - Digest parsing (`parser`) and record validation (`validator`)
//! - Interest matching (`Interests`, `NameMask`)
//! - Priority classification (`classify`)
//! - Report rendering (`ReportRenderer`)
//! - Announcement sources (`AnnouncementSource`)

pub mod classifier;
pub mod matcher;
pub mod parser;
pub mod report;
pub mod source;
pub mod validator;

pub use classifier::{Bucket, BucketKind, Classification, DateSpan, SortSummary, classify};
pub use matcher::{Interests, NameMask, matches_name};
pub use report::ReportRenderer;
pub use source::{AnnouncementSource, FileSource, StdinSource, TextSource};
pub use validator::validate;

// src/lib.rs

//! arXiv News Reader Library
//!
//! Parses plain-text arXiv announcement digests into records, tracks
//! revisions across runs, and sorts records by author, keyword, and
//! category interest into an HTML report.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

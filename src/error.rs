// src/error.rs

//! Unified error handling for the news reader.
//!
//! `AppError` covers failures that abort an operation (unreadable input,
//! broken configuration, archive I/O). Problems with individual records or
//! masks never abort a batch and are modelled separately as
//! [`InvalidReason`] and [`MaskError`].

use std::fmt;

use thiserror::Error;

/// Result type alias for reader operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Announcement source could not be read
    #[error("Source error for {context}: {message}")]
    Source { context: String, message: String },

    /// Author mask could not be compiled
    #[error("Invalid mask '{mask}': {message}")]
    Mask { mask: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an announcement source error with context.
    pub fn fetch(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Source {
            context: context.into(),
            message: message.to_string(),
        }
    }
}

impl From<MaskError> for AppError {
    fn from(err: MaskError) -> Self {
        let mask = err.mask().to_string();
        Self::Mask {
            mask,
            message: err.to_string(),
        }
    }
}

/// Why a parsed block was rejected as a record.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InvalidReason {
    #[error("no author information found")]
    MissingAuthors,

    #[error("empty author list")]
    EmptyAuthorList,

    #[error("no arXiv id found")]
    MissingIdentifier,

    #[error("no date found")]
    MissingDate,

    #[error("unparsable date")]
    UnparsableDate,
}

/// A key-author mask that cannot be turned into a pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// Nothing is left of the mask after normalization.
    #[error("mask '{0}' is empty after normalization")]
    Empty(String),

    /// The generated pattern was rejected by the regex engine.
    #[error("mask '{mask}' did not compile: {message}")]
    Pattern { mask: String, message: String },
}

impl MaskError {
    /// The mask as it was entered.
    pub fn mask(&self) -> &str {
        match self {
            Self::Empty(mask) => mask,
            Self::Pattern { mask, .. } => mask,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_error_converts_to_app_error() {
        let err: AppError = MaskError::Empty("  ".to_string()).into();
        match err {
            AppError::Mask { mask, message } => {
                assert_eq!(mask, "  ");
                assert!(message.contains("empty"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_reason_display() {
        assert_eq!(
            InvalidReason::MissingAuthors.to_string(),
            "no author information found"
        );
        assert_eq!(InvalidReason::UnparsableDate.to_string(), "unparsable date");
    }
}

// src/config.rs

//! Configuration loading utilities.
//!
//! This module provides convenience functions for loading the interest
//! lists, which may be given inline in the config file, in separate line
//! files, or both.

use std::fs;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{InterestLists, InterestsConfig};

/// Read a list file: one entry per line, blank lines and `#` comments
/// ignored, surrounding whitespace trimmed.
pub fn load_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::config(format!("Could not read from file '{}': {e}", path.display())))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Merge inline interests with the entries of any configured list files.
pub fn load_interests(config: &InterestsConfig) -> Result<InterestLists> {
    let mut lists = InterestLists {
        authors: config.authors.clone(),
        keywords: config.keywords.clone(),
        categories: config.categories.clone(),
    };
    lists.extend(InterestLists {
        authors: load_optional(config.authors_file.as_deref())?,
        keywords: load_optional(config.keywords_file.as_deref())?,
        categories: load_optional(config.categories_file.as_deref())?,
    });

    log::debug!(
        "Loaded {} author masks, {} keywords, {} categories",
        lists.authors.len(),
        lists.keywords.len(),
        lists.categories.len()
    );
    Ok(lists)
}

fn load_optional(path: Option<&Path>) -> Result<Vec<String>> {
    path.map_or_else(|| Ok(Vec::new()), |path| load_lines(path))
}

// src/services/matcher.rs

//! Interest matching: author masks, keywords, and categories.
//!
//! An author mask is a loosely written name such as `"J. Roos"`. A period
//! stands for "the rest of this name component", so the mask matches
//! `"Joris Roos"` and `"J. R. Roos"` but not `"Jane Smith"`. Components
//! must appear in order, the mask only has to match a prefix of the name,
//! and an abbreviated middle component may be missing from the name.

use regex::Regex;

use crate::error::MaskError;
use crate::models::{InterestLists, Record};
use crate::utils::text::{fold_name, normalize};

/// Pattern for the remainder of an abbreviated component.
const ABBREVIATION: &str = r"[\w\.\-]+\s?";

/// Pattern for the gap before the next component.
const COMPONENT_GAP: &str = r"\s[\w\.\-]*?\s?";

/// A compiled author mask.
#[derive(Debug, Clone)]
pub struct NameMask {
    mask: String,
    pattern: Regex,
}

impl NameMask {
    /// Compile a mask into a prefix pattern.
    pub fn compile(mask: &str) -> Result<Self, MaskError> {
        let folded = fold_name(mask);
        if folded.is_empty() {
            return Err(MaskError::Empty(mask.to_string()));
        }

        let components: Vec<&str> = folded.split(' ').collect();
        let last = components.len() - 1;
        let mut source = String::from("^");
        for (i, component) in components.iter().enumerate() {
            let piece = component_pattern(component);
            if i == 0 {
                source.push_str(&piece);
            } else if i < last && component.ends_with('.') {
                source.push_str(&format!("(?:{COMPONENT_GAP}{piece})?"));
            } else {
                source.push_str(COMPONENT_GAP);
                source.push_str(&piece);
            }
        }

        let pattern = Regex::new(&source).map_err(|e| MaskError::Pattern {
            mask: mask.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            mask: mask.trim().to_string(),
            pattern,
        })
    }

    /// Check whether the mask matches an author name.
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(&fold_name(name))
    }

    /// The mask as configured.
    pub fn as_str(&self) -> &str {
        &self.mask
    }

    /// The generated regular expression.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Pattern for one component: literal text, periods widened to abbreviations.
fn component_pattern(component: &str) -> String {
    let mut out = String::new();
    let mut literal = String::new();
    for c in component.chars() {
        if c == '.' {
            out.push_str(&regex::escape(&literal));
            literal.clear();
            out.push_str(ABBREVIATION);
        } else {
            literal.push(c);
        }
    }
    out.push_str(&regex::escape(&literal));
    out
}

/// Check a single mask against a single name. Masks that do not compile
/// match nothing.
pub fn matches_name(mask: &str, name: &str) -> bool {
    NameMask::compile(mask).is_ok_and(|m| m.matches(name))
}

/// Compiled interest lists, ready to test records against.
#[derive(Debug, Clone, Default)]
pub struct Interests {
    authors: Vec<NameMask>,
    keywords: Vec<String>,
    categories: Vec<String>,
}

impl Interests {
    /// Compile interest lists.
    ///
    /// Masks that cannot be compiled are skipped and returned for reporting.
    /// Keywords and categories that normalize to nothing are dropped, since
    /// an empty needle would match every record.
    pub fn compile(lists: &InterestLists) -> (Self, Vec<MaskError>) {
        let mut skipped = Vec::new();
        let mut authors = Vec::new();
        for mask in &lists.authors {
            match NameMask::compile(mask) {
                Ok(compiled) => authors.push(compiled),
                Err(e) => {
                    log::warn!("Skipping author mask: {}", e);
                    skipped.push(e);
                }
            }
        }

        let interests = Self {
            authors,
            keywords: normalized_needles(&lists.keywords, "keyword"),
            categories: normalized_needles(&lists.categories, "category"),
        };
        (interests, skipped)
    }

    pub fn author_masks(&self) -> &[NameMask] {
        &self.authors
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Whether any mask matches any of the record's authors.
    pub fn matches_author(&self, record: &Record) -> bool {
        record
            .authors
            .iter()
            .any(|name| self.authors.iter().any(|mask| mask.matches(name)))
    }

    /// Whether any keyword occurs in the record's title or abstract.
    pub fn matches_keyword(&self, record: &Record) -> bool {
        if self.keywords.is_empty() {
            return false;
        }
        let content = normalize(&format!("{} {}", record.title(), record.abstract_text()));
        self.keywords.iter().any(|k| content.contains(k.as_str()))
    }

    /// Whether any category token occurs in the record's categories.
    pub fn matches_category(&self, record: &Record) -> bool {
        if self.categories.is_empty() {
            return false;
        }
        let categories = normalize(record.categories());
        self.categories
            .iter()
            .any(|c| categories.contains(c.as_str()))
    }
}

fn normalized_needles(entries: &[String], kind: &str) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| {
            let needle = normalize(entry);
            if needle.is_empty() {
                log::debug!("Ignoring empty {} entry {:?}", kind, entry);
                None
            } else {
                Some(needle)
            }
        })
        .collect()
}

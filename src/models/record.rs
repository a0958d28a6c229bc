//! Announcement record structures.
//!
//! A block of announcement text first becomes a [`RawRecord`], an untyped
//! bag of fields. Validation turns it into a [`Record`], the typed view that
//! every later stage works with. Blocks that fail validation never become a
//! `Record`, so only valid records can be stored, sorted, or classified.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Field names produced by the announcement format.
pub mod field {
    pub const TITLE: &str = "title";
    pub const AUTHORS: &str = "authors";
    pub const DATE: &str = "date";
    pub const SIZE: &str = "size";
    pub const COMMENTS: &str = "comments";
    pub const CATEGORIES: &str = "categories";
    pub const ARXIV: &str = "arxiv";
    pub const ABSTRACT: &str = "abstract";
}

/// Fields of one announcement block as they appeared in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// Lower-cased field name to raw value
    pub fields: BTreeMap<String, String>,

    /// Whether the block carried the "replaced with revised version" marker
    pub is_revision: bool,
}

impl RawRecord {
    /// Look up a raw field value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// A validated announcement of one article version.
///
/// Identity is the pair `(timestamp, identifier)`: the same announcement
/// seen twice compares equal even if other fields differ. Records order by
/// timestamp, with the identifier as a tie-breaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// arXiv identifier (first token of the `arxiv` field)
    pub identifier: String,

    /// Cleaned author names, in announcement order
    pub authors: Vec<String>,

    /// Announcement time parsed from the `date` field
    pub timestamp: NaiveDateTime,

    /// Whether this record announces a revised version
    pub is_revision: bool,

    /// All fields, with `date` stripped of its size annotation
    pub fields: BTreeMap<String, String>,
}

impl Record {
    /// Field value, or the empty string when absent.
    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).map_or("", String::as_str)
    }

    pub fn title(&self) -> &str {
        self.field(field::TITLE)
    }

    pub fn abstract_text(&self) -> &str {
        self.field(field::ABSTRACT)
    }

    pub fn categories(&self) -> &str {
        self.field(field::CATEGORIES)
    }

    pub fn comments(&self) -> &str {
        self.field(field::COMMENTS)
    }

    /// The date string as announced, without the size annotation.
    pub fn date_label(&self) -> &str {
        self.field(field::DATE)
    }

    /// Size annotation split off the date line (e.g. `14kb`).
    pub fn size(&self) -> Option<&str> {
        self.fields.get(field::SIZE).map(String::as_str)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp && self.identifier == other.identifier
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.timestamp.hash(state);
        self.identifier.hash(state);
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.identifier.cmp(&other.identifier))
    }
}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {}. arXiv:{}",
            self.authors.join(", "),
            self.title(),
            self.identifier
        )?;
        if self.is_revision {
            write!(f, " (revised version)")?;
        }
        write!(f, " ({})", self.timestamp)
    }
}

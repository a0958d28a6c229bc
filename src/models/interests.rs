//! Interest lists as loaded from configuration.

use serde::{Deserialize, Serialize};

/// Plain interest lists, before compilation into matchers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestLists {
    /// Author masks such as "J. Roos"
    #[serde(default)]
    pub authors: Vec<String>,

    /// Keywords searched in title and abstract
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Category tokens such as "math.CA"
    #[serde(default)]
    pub categories: Vec<String>,
}

impl InterestLists {
    /// True when no interest of any kind is configured.
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty() && self.keywords.is_empty() && self.categories.is_empty()
    }

    /// Append another set of lists to this one.
    pub fn extend(&mut self, other: InterestLists) {
        self.authors.extend(other.authors);
        self.keywords.extend(other.keywords);
        self.categories.extend(other.categories);
    }
}

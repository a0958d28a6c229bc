// src/utils/text.rs

//! Text folding used for matching, searching, and rendering.
//!
//! Two strengths of normalization exist:
//! - [`normalize`] folds to bare ASCII letters and digits. Keyword and
//!   category search run on this form.
//! - [`fold_name`] keeps word characters, hyphens, periods, and single
//!   spaces, so that name components stay separable for mask matching.
//!
//! Both strip accents and lower-case, so comparisons on either form are
//! case- and accent-insensitive.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

static NAME_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\.\-\s]").expect("static name noise pattern"));

/// Remove accents by decomposing and dropping combining marks.
pub fn strip_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Fold text to lower-case ASCII letters and digits only.
///
/// ```
/// use newsreader::utils::text::normalize;
///
/// assert_eq!(normalize("Ångström"), "angstrom");
/// assert_eq!(normalize("Navier-Stokes eq."), "navierstokeseq");
/// ```
pub fn normalize(s: &str) -> String {
    strip_accents(s)
        .chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Strip accents from a personal name, lower-case it, and drop everything
/// but word characters, hyphens, periods, and whitespace. Runs of whitespace
/// collapse to one space.
pub fn fold_name(s: &str) -> String {
    let lowered = strip_accents(s).to_lowercase();
    let cleaned = NAME_NOISE.replace_all(&lowered, "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '>' => out.push_str("&gt;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
    out
}

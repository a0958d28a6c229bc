//! Utility functions and helpers.

pub mod text;

pub use text::{escape_html, fold_name, normalize, strip_accents};

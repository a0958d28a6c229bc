// src/services/source.rs

//! Announcement sources.
//!
//! A source yields the raw digest text for one run. Mail retrieval lives
//! outside this crate; anything that can produce the text implements
//! [`AnnouncementSource`].

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::error::{AppError, Result};

/// Producer of raw announcement text.
pub trait AnnouncementSource {
    /// Fetch the concatenated announcement text. Empty text means there is
    /// nothing new to report.
    fn fetch(&self) -> Result<String>;
}

/// Reads announcements from plain-text files, concatenated in order.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    paths: Vec<PathBuf>,
}

impl FileSource {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl AnnouncementSource for FileSource {
    fn fetch(&self) -> Result<String> {
        let mut content = String::new();
        for path in &self.paths {
            let text = fs::read_to_string(path)
                .map_err(|e| AppError::fetch(path.display().to_string(), e))?;
            log::debug!("Read {} bytes from {}", text.len(), path.display());
            content.push_str(&normalize_newlines(&text));
        }
        log::info!("Found {} announcement file(s).", self.paths.len());
        Ok(content)
    }
}

/// Reads announcements from standard input.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinSource;

impl AnnouncementSource for StdinSource {
    fn fetch(&self) -> Result<String> {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| AppError::fetch("stdin", e))?;
        Ok(normalize_newlines(&text))
    }
}

/// Fixed text, mostly useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct TextSource(pub String);

impl AnnouncementSource for TextSource {
    fn fetch(&self) -> Result<String> {
        Ok(normalize_newlines(&self.0))
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_source_concatenates_in_order() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("a.txt");
        let second = tmp.path().join("b.txt");
        fs::write(&first, "one\r\ntwo\r\n").unwrap();
        fs::write(&second, "three\n").unwrap();

        let source = FileSource::new([&first, &second]);
        assert_eq!(source.paths().len(), 2);
        assert_eq!(source.fetch().unwrap(), "one\ntwo\nthree\n");
    }

    #[test]
    fn test_file_source_missing_file() {
        let tmp = TempDir::new().unwrap();
        let source = FileSource::new([tmp.path().join("missing.txt")]);
        match source.fetch() {
            Err(AppError::Source { context, .. }) => assert!(context.ends_with("missing.txt")),
            other => panic!("expected source error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_sources() {
        assert_eq!(FileSource::default().fetch().unwrap(), "");
        assert_eq!(TextSource(String::new()).fetch().unwrap(), "");
    }
}

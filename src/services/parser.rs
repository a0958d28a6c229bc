// src/services/parser.rs

//! Announcement text parser.
//!
//! A digest is a preamble followed by blocks, each introduced by a line of
//! dashes and a line holding only `\\`. Inside a block, header lines are
//! `Key: value` pairs (values may continue on following lines), and the
//! abstract sits between two `\\` lines:
//!
//! ```text
//! ------------------------------------------------------------------------------
//! \\
//! arXiv:1701.00123
//! Date: Mon, 2 Jan 2017 18:04:21 GMT   (15kb)
//!
//! Title: On maximal functions
//! Authors: Joris Roos, Andreas Seeger
//! Categories: math.CA
//! \\
//!   We prove bounds for ...
//! \\ ( https://arxiv.org/abs/1701.00123 ,  15kb)
//! ```
//!
//! Parsing never fails: a malformed block just yields a [`RawRecord`] with
//! fewer fields, which validation later rejects.

use std::mem;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{RawRecord, field};

/// Line prefix marking a block as a revised version of an earlier article.
pub const REVISION_MARKER: &str = "replaced with revised version";

/// Line that opens and closes the abstract.
pub const ABSTRACT_MARKER: &str = "\\\\";

static BLOCK_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-[-\r\n]*\s*\n\\\\\s*\n").expect("static block separator pattern")
});

/// Split a digest into raw block texts, dropping the preamble.
pub fn segment(text: &str) -> Vec<&str> {
    BLOCK_SEPARATOR.split(text).skip(1).collect()
}

/// Parse every block of a digest.
pub fn parse_blocks(text: &str) -> Vec<RawRecord> {
    segment(text).into_iter().map(parse_block).collect()
}

/// Parse one block into its raw fields.
pub fn parse_block(block: &str) -> RawRecord {
    let mut parser = BlockParser::new();
    for line in block.lines() {
        if parser.is_done() {
            break;
        }
        parser.feed(line);
    }
    parser.finish()
}

/// Position of the parser within a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Mode {
    /// Looking for the next field, the abstract, or the revision marker.
    #[default]
    Scan,
    /// Collecting a `key: value` pair that may continue on later lines.
    Field { key: String, value: String },
    /// Collecting abstract lines until the closing marker.
    Abstract { value: String },
    /// The abstract closed; the rest of the block is ignored.
    Done,
}

/// Line-oriented state machine over the lines of one block.
#[derive(Debug, Default)]
struct BlockParser {
    record: RawRecord,
    mode: Mode,
}

impl BlockParser {
    fn new() -> Self {
        Self::default()
    }

    fn is_done(&self) -> bool {
        self.mode == Mode::Done
    }

    fn feed(&mut self, line: &str) {
        let mode = mem::take(&mut self.mode);
        self.mode = match mode {
            Mode::Scan => scan(&mut self.record, line),
            Mode::Field { key, value } => field_line(&mut self.record, key, value, line),
            Mode::Abstract { value } => abstract_line(&mut self.record, value, line),
            Mode::Done => Mode::Done,
        };
    }

    fn finish(mut self) -> RawRecord {
        if let Mode::Field { key, value } = mem::take(&mut self.mode) {
            self.record.fields.insert(key, value);
        }
        if let Some(id) = self.record.fields.get_mut(field::ARXIV) {
            let first = id.split_whitespace().next().unwrap_or("").to_string();
            *id = first;
        }
        self.record
    }
}

fn scan(record: &mut RawRecord, line: &str) -> Mode {
    if let Some(rest) = line.strip_prefix(REVISION_MARKER) {
        record
            .fields
            .insert(field::DATE.to_string(), rest.trim().to_string());
        record.is_revision = true;
        return Mode::Scan;
    }
    if let Some((key, value)) = line.split_once(':') {
        return Mode::Field {
            key: key.trim().to_lowercase(),
            value: value.trim().to_string(),
        };
    }
    if line.trim() == ABSTRACT_MARKER {
        return Mode::Abstract {
            value: String::new(),
        };
    }
    Mode::Scan
}

fn field_line(record: &mut RawRecord, key: String, mut value: String, line: &str) -> Mode {
    if !line.contains(':') && !line.starts_with(ABSTRACT_MARKER) {
        push_joined(&mut value, line);
        return Mode::Field { key, value };
    }
    record.fields.insert(key, value);
    scan(record, line)
}

fn abstract_line(record: &mut RawRecord, mut value: String, line: &str) -> Mode {
    if line.trim().starts_with(ABSTRACT_MARKER) {
        record.fields.insert(field::ABSTRACT.to_string(), value);
        return Mode::Done;
    }
    push_joined(&mut value, line);
    Mode::Abstract { value }
}

/// Append a trimmed line, space-separated; blank lines add nothing.
fn push_joined(value: &mut String, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    if !value.is_empty() {
        value.push(' ');
    }
    value.push_str(line);
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: &str = "arXiv:1701.00123\n\
Date: Mon, 2 Jan 2017 18:04:21 GMT   (15kb)\n\
\n\
Title: On maximal functions\n\
  along curves\n\
Authors: Joris Roos, Andreas Seeger\n\
Categories: math.CA\n\
\\\\\n\
  We prove bounds for\n\
  maximal functions.\n\
\\\\ ( https://arxiv.org/abs/1701.00123 ,  15kb)\n";

    #[test]
    fn test_segment_drops_preamble() {
        let text = "Preamble\n\
------------------------------------------------------------------------------\n\
\\\\\n\
first\n\
------------------------------------------------------------------------------\n\
\\\\\n\
second\n";
        let blocks = segment(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].trim(), "first");
        assert_eq!(blocks[1].trim(), "second");
    }

    #[test]
    fn test_segment_tolerates_carriage_returns() {
        let text = "Preamble\r\n-----------\r\n\\\\\r\nfirst\r\n";
        let blocks = segment(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].trim(), "first");
    }

    #[test]
    fn test_segment_without_separator_is_empty() {
        assert!(segment("just some text\nwith lines\n").is_empty());
    }

    #[test]
    fn test_parse_block_fields() {
        let record = parse_block(BLOCK);
        assert!(!record.is_revision);
        assert_eq!(record.get("arxiv"), Some("1701.00123"));
        assert_eq!(
            record.get("date"),
            Some("Mon, 2 Jan 2017 18:04:21 GMT   (15kb)")
        );
        assert_eq!(record.get("title"), Some("On maximal functions along curves"));
        assert_eq!(record.get("authors"), Some("Joris Roos, Andreas Seeger"));
        assert_eq!(record.get("categories"), Some("math.CA"));
        assert_eq!(
            record.get("abstract"),
            Some("We prove bounds for maximal functions.")
        );
    }

    #[test]
    fn test_parse_block_ignores_text_after_abstract() {
        let block = format!("{BLOCK}Trailer: ignored\n");
        let record = parse_block(&block);
        assert_eq!(record.get("trailer"), None);
    }

    #[test]
    fn test_revision_marker_sets_date() {
        let block = "arXiv:1612.01234\n\
replaced with revised version Tue, 3 Jan 2017 09:12:00 GMT   (20kb)\n\
\n\
Title: Old paper\n\
Authors: A. Person\n";
        let record = parse_block(block);
        assert!(record.is_revision);
        assert_eq!(
            record.get("date"),
            Some("Tue, 3 Jan 2017 09:12:00 GMT   (20kb)")
        );
        assert_eq!(record.get("title"), Some("Old paper"));
        assert_eq!(record.fields.len(), 4);
    }

    #[test]
    fn test_pending_field_committed_at_end() {
        let record = parse_block("Authors: A. Person\n  and B. Person");
        assert_eq!(record.get("authors"), Some("A. Person and B. Person"));
    }

    #[test]
    fn test_identifier_truncated_to_first_token() {
        let record = parse_block("arXiv:1701.00042 (*cross-listing*)\n");
        assert_eq!(record.get("arxiv"), Some("1701.00042"));
    }

    #[test]
    fn test_field_mode_hands_marker_to_scan() {
        let mut record = RawRecord::default();
        let mode = field_line(&mut record, "title".into(), "T".into(), "\\\\");
        assert_eq!(mode, Mode::Abstract { value: String::new() });
        assert_eq!(record.get("title"), Some("T"));
    }

    #[test]
    fn test_scan_ignores_plain_lines() {
        let mut record = RawRecord::default();
        assert_eq!(scan(&mut record, "no separator here"), Mode::Scan);
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_abstract_terminates() {
        let mut record = RawRecord::default();
        let mode = abstract_line(&mut record, "text".into(), "  \\\\ (url)");
        assert_eq!(mode, Mode::Done);
        assert_eq!(record.get("abstract"), Some("text"));
    }

    #[test]
    fn test_garbage_block_yields_no_fields() {
        let record = parse_block("%%%%%%%%%%%%\nnothing useful\n");
        assert!(record.fields.is_empty());
    }
}

// src/services/validator.rs

//! Record validation.
//!
//! Turns a [`RawRecord`] into a typed [`Record`], or reports the first
//! missing or malformed piece as an [`InvalidReason`].

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::InvalidReason;
use crate::models::{RawRecord, Record, field};

/// Date layout of announcement lines, without the trailing zone name.
const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S";

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("static parenthetical pattern"));

static AUTHOR_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",|\s+and\s+").expect("static author separator pattern"));

static AUTHOR_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\-\.\s]").expect("static author noise pattern"));

static SIZE_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([\w,]*)\)").expect("static size annotation pattern"));

/// Validate a parsed block and derive its typed fields.
pub fn validate(raw: RawRecord) -> Result<Record, InvalidReason> {
    let RawRecord {
        mut fields,
        is_revision,
    } = raw;

    let authors_raw = fields
        .get(field::AUTHORS)
        .ok_or(InvalidReason::MissingAuthors)?;
    let authors = split_authors(authors_raw);
    if authors.is_empty() {
        return Err(InvalidReason::EmptyAuthorList);
    }

    let identifier = fields
        .get(field::ARXIV)
        .filter(|id| !id.is_empty())
        .cloned()
        .ok_or(InvalidReason::MissingIdentifier)?;

    let date_raw = fields
        .get(field::DATE)
        .ok_or(InvalidReason::MissingDate)?;
    let (date, size) = split_size(date_raw);
    if let Some(size) = size {
        fields.insert(field::SIZE.to_string(), size);
    }
    let timestamp = parse_date(&date).ok_or(InvalidReason::UnparsableDate)?;
    fields.insert(field::DATE.to_string(), date);

    Ok(Record {
        identifier,
        authors,
        timestamp,
        is_revision,
        fields,
    })
}

/// Clean a raw author list into individual names.
///
/// Parenthetical asides (affiliations) are dropped, names are split on
/// commas and on the word "and", and characters other than word
/// characters, hyphens, periods, and whitespace are removed.
pub fn split_authors(raw: &str) -> Vec<String> {
    let without_asides = PARENTHETICAL.replace_all(raw, "");
    AUTHOR_SEPARATOR
        .split(&without_asides)
        .map(|name| {
            let cleaned = AUTHOR_NOISE.replace_all(name, "");
            cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .filter(|name| !name.is_empty())
        .collect()
}

/// Split the size annotation off a date line.
///
/// `"Mon, 2 Jan 2017 18:04:21 GMT   (15kb)"` becomes
/// `("Mon, 2 Jan 2017 18:04:21 GMT", Some("15kb"))`.
pub fn split_size(raw: &str) -> (String, Option<String>) {
    let size = SIZE_ANNOTATION
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    let date = SIZE_ANNOTATION.replace_all(raw, "").trim().to_string();
    (date, size)
}

/// Parse an announcement date such as `"Mon, 2 Jan 2017 18:04:21 GMT"`.
///
/// The trailing zone name must be alphabetic; its value is not applied.
/// The weekday has to agree with the date.
pub fn parse_date(date: &str) -> Option<NaiveDateTime> {
    let (stamp, zone) = date.trim().rsplit_once(char::is_whitespace)?;
    if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    NaiveDateTime::parse_from_str(stamp.trim_end(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn raw(pairs: &[(&str, &str)]) -> RawRecord {
        RawRecord {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            is_revision: false,
        }
    }

    fn complete() -> RawRecord {
        raw(&[
            ("arxiv", "1701.00123"),
            ("date", "Mon, 2 Jan 2017 18:04:21 GMT   (15kb)"),
            ("title", "On maximal functions"),
            ("authors", "Joris Roos (MIT), Andreas Seeger"),
        ])
    }

    #[test]
    fn test_valid_record() {
        let record = validate(complete()).unwrap();
        assert_eq!(record.identifier, "1701.00123");
        assert_eq!(record.authors, vec!["Joris Roos", "Andreas Seeger"]);
        assert_eq!(record.timestamp.year(), 2017);
        assert_eq!(record.timestamp.day(), 2);
        assert_eq!(record.timestamp.hour(), 18);
        assert_eq!(record.date_label(), "Mon, 2 Jan 2017 18:04:21 GMT");
        assert_eq!(record.size(), Some("15kb"));
        assert!(!record.is_revision);
    }

    #[test]
    fn test_missing_authors() {
        let mut record = complete();
        record.fields.remove("authors");
        assert_eq!(validate(record), Err(InvalidReason::MissingAuthors));
    }

    #[test]
    fn test_empty_author_list() {
        let mut record = complete();
        record
            .fields
            .insert("authors".into(), " (Collaboration) , ,".into());
        assert_eq!(validate(record), Err(InvalidReason::EmptyAuthorList));
    }

    #[test]
    fn test_missing_identifier() {
        let mut record = complete();
        record.fields.remove("arxiv");
        assert_eq!(validate(record), Err(InvalidReason::MissingIdentifier));

        let mut record = complete();
        record.fields.insert("arxiv".into(), String::new());
        assert_eq!(validate(record), Err(InvalidReason::MissingIdentifier));
    }

    #[test]
    fn test_missing_date() {
        let mut record = complete();
        record.fields.remove("date");
        assert_eq!(validate(record), Err(InvalidReason::MissingDate));
    }

    #[test]
    fn test_unparsable_date() {
        let mut record = complete();
        record.fields.insert("date".into(), "sometime in January".into());
        assert_eq!(validate(record), Err(InvalidReason::UnparsableDate));
    }

    #[test]
    fn test_authors_checked_before_identifier() {
        let record = raw(&[("title", "Only a title")]);
        assert_eq!(validate(record), Err(InvalidReason::MissingAuthors));
    }

    #[test]
    fn test_split_authors() {
        assert_eq!(
            split_authors("A. Person, B. Person and C. D'Arcy (Some Univ.)"),
            vec!["A. Person", "B. Person", "C. DArcy"]
        );
        assert_eq!(
            split_authors("Ferdinand Smith, and Jean-Luc Picard"),
            vec!["Ferdinand Smith", "Jean-Luc Picard"]
        );
    }

    #[test]
    fn test_split_size() {
        assert_eq!(
            split_size("Tue, 3 Jan 2017 09:12:00 GMT   (20kb,D)"),
            (
                "Tue, 3 Jan 2017 09:12:00 GMT".to_string(),
                Some("20kb,D".to_string())
            )
        );
        assert_eq!(
            split_size("Tue, 3 Jan 2017 09:12:00 GMT"),
            ("Tue, 3 Jan 2017 09:12:00 GMT".to_string(), None)
        );
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("Tue, 3 Jan 2017 09:12:00 GMT").is_some());
        assert!(parse_date("Tue, 03 Jan 2017 09:12:00 UTC").is_some());
        assert!(parse_date("Tue, 3 Jan 2017 09:12:00").is_none());
        assert!(parse_date("Tue, 3 Jan 2017 09:12:00 +0000").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_parse_date_checks_weekday() {
        // 2 Jan 2017 was a Monday.
        assert!(parse_date("Mon, 2 Jan 2017 18:04:21 GMT").is_some());
        assert!(parse_date("Tue, 2 Jan 2017 18:04:21 GMT").is_none());

        let mut record = complete();
        record
            .fields
            .insert("date".into(), "Tue, 2 Jan 2017 18:04:21 GMT   (15kb)".into());
        assert_eq!(validate(record), Err(InvalidReason::UnparsableDate));
    }

    #[test]
    fn test_parse_date_ignores_zone_name() {
        let gmt = parse_date("Mon, 2 Jan 2017 18:04:21 GMT").unwrap();
        let est = parse_date("Mon, 2 Jan 2017 18:04:21 EST").unwrap();
        assert_eq!(gmt, est);
    }
}

// src/services/classifier.rs

//! Priority classification of records into interest buckets.
//!
//! Every record lands in exactly one bucket, tried in order:
//! author match, keyword match, category match, remaining.

use chrono::NaiveDateTime;

use crate::models::Record;
use crate::services::matcher::Interests;

/// Which interest a bucket collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKind {
    Author,
    Keyword,
    Category,
    Remaining,
}

impl BucketKind {
    /// All kinds in priority order.
    pub const ALL: [BucketKind; 4] = [
        BucketKind::Author,
        BucketKind::Keyword,
        BucketKind::Category,
        BucketKind::Remaining,
    ];

    /// Section heading used in reports.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::Author => "Author matches",
            Self::Keyword => "Keyword matches",
            Self::Category => "Category matches",
            Self::Remaining => "Remaining",
        }
    }
}

/// Records of one bucket, in input order.
#[derive(Debug, Clone)]
pub struct Bucket {
    pub kind: BucketKind,
    pub records: Vec<Record>,
}

impl Bucket {
    fn new(kind: BucketKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn revision_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_revision).count()
    }

    pub fn new_count(&self) -> usize {
        self.len() - self.revision_count()
    }

    /// New records first, then revisions; input order within each group.
    pub fn ordered(&self) -> impl Iterator<Item = &Record> {
        let new = self.records.iter().filter(|r| !r.is_revision);
        let revised = self.records.iter().filter(|r| r.is_revision);
        new.chain(revised)
    }
}

/// Earliest and latest timestamp among reported records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
}

impl DateSpan {
    fn at(timestamp: NaiveDateTime) -> Self {
        Self {
            min: timestamp,
            max: timestamp,
        }
    }

    fn include(&mut self, timestamp: NaiveDateTime) {
        self.min = self.min.min(timestamp);
        self.max = self.max.max(timestamp);
    }

    /// Whole days between the earliest and latest timestamp.
    pub fn days(&self) -> i64 {
        (self.max - self.min).num_days()
    }
}

/// Per-bucket record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSummary {
    pub author: usize,
    pub keyword: usize,
    pub category: usize,
    pub remaining: usize,
}

impl SortSummary {
    pub fn total(&self) -> usize {
        self.author + self.keyword + self.category + self.remaining
    }
}

/// Result of classifying a batch of records.
#[derive(Debug, Clone)]
pub struct Classification {
    buckets: [Bucket; 4],
    include_remaining: bool,
    span: Option<DateSpan>,
}

impl Classification {
    /// Bucket of the given kind.
    pub fn bucket(&self, kind: BucketKind) -> &Bucket {
        &self.buckets[kind as usize]
    }

    /// Buckets that appear in a report: the remaining bucket only when
    /// it was requested.
    pub fn sections(&self) -> impl Iterator<Item = &Bucket> {
        let include_remaining = self.include_remaining;
        self.buckets
            .iter()
            .filter(move |b| include_remaining || b.kind != BucketKind::Remaining)
    }

    /// Date span of the reported records, `None` when nothing is reported.
    pub fn span(&self) -> Option<DateSpan> {
        self.span
    }

    /// Number of records in reported sections.
    pub fn reported_count(&self) -> usize {
        self.sections().map(Bucket::len).sum()
    }

    /// Number of revisions in reported sections.
    pub fn reported_revisions(&self) -> usize {
        self.sections().map(Bucket::revision_count).sum()
    }

    pub fn reported_new(&self) -> usize {
        self.reported_count() - self.reported_revisions()
    }

    /// Counts of every bucket, reported or not.
    pub fn summary(&self) -> SortSummary {
        SortSummary {
            author: self.bucket(BucketKind::Author).len(),
            keyword: self.bucket(BucketKind::Keyword).len(),
            category: self.bucket(BucketKind::Category).len(),
            remaining: self.bucket(BucketKind::Remaining).len(),
        }
    }
}

/// Assign a record to the first bucket whose interest it matches.
pub fn bucket_for(record: &Record, interests: &Interests) -> BucketKind {
    if interests.matches_author(record) {
        BucketKind::Author
    } else if interests.matches_keyword(record) {
        BucketKind::Keyword
    } else if interests.matches_category(record) {
        BucketKind::Category
    } else {
        BucketKind::Remaining
    }
}

/// Classify records by priority.
///
/// The date span covers matched records, and remaining records only when
/// `include_remaining` is set.
pub fn classify(records: &[Record], interests: &Interests, include_remaining: bool) -> Classification {
    let mut buckets = BucketKind::ALL.map(Bucket::new);
    let mut span: Option<DateSpan> = None;

    for record in records {
        let kind = bucket_for(record, interests);
        if kind != BucketKind::Remaining || include_remaining {
            match span.as_mut() {
                Some(span) => span.include(record.timestamp),
                None => span = Some(DateSpan::at(record.timestamp)),
            }
        }
        buckets[kind as usize].records.push(record.clone());
    }

    let classification = Classification {
        buckets,
        include_remaining,
        span,
    };
    let summary = classification.summary();
    log::info!(
        "Sorted {} entries: {} author match, {} keyword match, {} category match, {} remaining",
        records.len(),
        summary.author,
        summary.keyword,
        summary.category,
        summary.remaining
    );
    classification
}

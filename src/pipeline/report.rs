// src/pipeline/report.rs

//! Report pipeline: fetch, ingest, classify, render, write.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{AppError, Result};
use crate::models::{Config, InterestLists};
use crate::services::{AnnouncementSource, Interests, ReportRenderer, SortSummary, classify};
use crate::storage::{ArchiveStorage, RecordStore};

use super::ingest::{ParseSummary, ingest};

/// What a report run produced.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    /// Where the report was written
    pub path: PathBuf,
    /// Ingestion counters
    pub summary: ParseSummary,
    /// Records per bucket
    pub sorted: SortSummary,
    /// Records listed in the report
    pub reported: usize,
}

/// Run the full report pipeline.
///
/// With an archive, previously seen records are loaded first and are not
/// reported again. The grown store is saved only once the report file is
/// written, so a failed run leaves the archive untouched. Returns `None`
/// when the source had no text.
pub fn run_report(
    config: &Config,
    interests: &InterestLists,
    source: &dyn AnnouncementSource,
    archive: Option<&dyn ArchiveStorage>,
) -> Result<Option<ReportOutcome>> {
    let content = source.fetch()?;
    if content.trim().is_empty() {
        log::info!("No new announcements found.");
        return Ok(None);
    }
    let path = output_path(&config.reader.outfile)?;

    let mut store = match archive {
        Some(archive) => archive.load()?,
        None => RecordStore::new(),
    };
    let ingested = ingest(&content, &mut store);

    if interests.is_empty() {
        log::warn!("No interests configured; every entry counts as remaining");
    }
    let (interests, skipped) = Interests::compile(interests);
    if !skipped.is_empty() {
        log::warn!("{} author mask(s) skipped", skipped.len());
    }
    let classification = classify(
        &ingested.records,
        &interests,
        config.reader.include_remaining,
    );

    let html = ReportRenderer::new(&config.reader.report_title).render(&classification);
    write_report(&path, &html)?;
    log::info!("Report written to {}", path.display());

    if let Some(archive) = archive {
        archive.save(&store)?;
    }
    if config.reader.open_outfile {
        open_report(&path);
    }

    Ok(Some(ReportOutcome {
        path,
        summary: ingested.summary,
        sorted: classification.summary(),
        reported: classification.reported_count(),
    }))
}

/// Expand the strftime pattern of the output file name with the local time.
pub fn output_path(pattern: &str) -> Result<PathBuf> {
    let mut name = String::new();
    write!(name, "{}", Local::now().format(pattern))
        .map_err(|_| AppError::config(format!("invalid outfile pattern '{pattern}'")))?;
    Ok(PathBuf::from(name))
}

fn write_report(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, html)?;
    Ok(())
}

/// Show the report in the default viewer. Failure only warns.
fn open_report(path: &Path) {
    if let Err(e) = open::that(path) {
        log::warn!("Couldn't open {}: {}", path.display(), e);
    }
}

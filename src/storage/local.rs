//! Local filesystem archive.
//!
//! Stores the whole [`RecordStore`] as one pretty-printed JSON file. Writes
//! go to a temporary sibling file first and are renamed into place, so a
//! crash mid-write leaves the previous archive intact.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{AppError, Result};
use crate::storage::{ArchiveStorage, RecordStore};

/// JSON file archive backend.
#[derive(Debug, Clone)]
pub struct LocalArchive {
    path: PathBuf,
}

impl LocalArchive {
    /// Create an archive stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the archive file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir()?;

        let tmp = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.flush()?;
        drop(file);

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Write JSON data.
    fn write_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(&bytes)
    }

    /// Read bytes, returning None if file doesn't exist.
    fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    fn read_json<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match self.read_bytes()? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

impl ArchiveStorage for LocalArchive {
    fn load(&self) -> Result<RecordStore> {
        match self.read_json::<RecordStore>()? {
            Some(store) => {
                log::info!(
                    "Loaded archive {} ({} articles, {} variants)",
                    self.path.display(),
                    store.len(),
                    store.variant_count()
                );
                Ok(store)
            }
            None => {
                log::warn!("No archive found at {}", self.path.display());
                Ok(RecordStore::new())
            }
        }
    }

    fn save(&self, store: &RecordStore) -> Result<()> {
        self.write_json(store)?;
        log::info!(
            "Archive written to {} ({} articles, {} variants)",
            self.path.display(),
            store.len(),
            store.variant_count()
        );
        Ok(())
    }
}

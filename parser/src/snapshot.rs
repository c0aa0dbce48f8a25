//! Local store of downloaded documentation pages.
//!
//! Snapshots live in timestamp-named directories under a root:
//!
//! ```text
//! docs/
//!   20240115T103000Z/g-codes.html
//!   20240302T081512Z/g-codes.html
//! ```
//!
//! Timestamp names sort lexicographically in chronological order, so the
//! newest snapshot is the greatest directory name. Fetching pages is left
//! to the caller; [`SnapshotStore::import`] only copies an already
//! downloaded file into place.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::dom::Document;
use crate::error::{ParseError, Result};
use crate::registry::DocumentationParser;

/// `chrono` format of snapshot directory names.
pub const SNAPSHOT_DIR_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// File-backed snapshot store.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Snapshot directories, oldest first. A missing root holds none.
    pub fn snapshots(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut dirs = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    /// Newest snapshot directory.
    pub fn latest(&self) -> Result<Option<PathBuf>> {
        Ok(self.snapshots()?.pop())
    }

    /// Newest snapshot file named `file_name`, skipping snapshots taken for
    /// other sources.
    pub fn latest_file(&self, file_name: &str) -> Result<Option<PathBuf>> {
        Ok(self
            .snapshots()?
            .into_iter()
            .rev()
            .map(|dir| dir.join(file_name))
            .find(|path| path.is_file()))
    }

    /// Copies a downloaded page into a new snapshot directory and returns
    /// the stored file's path.
    pub fn import(&self, parser: &dyn DocumentationParser, page: &Path) -> Result<PathBuf> {
        let dir = self
            .root
            .join(Utc::now().format(SNAPSHOT_DIR_FORMAT).to_string());
        fs::create_dir_all(&dir)?;

        let target = dir.join(parser.snapshot_file());
        fs::copy(page, &target)?;
        info!(
            source = parser.id(),
            snapshot = %target.display(),
            "imported documentation snapshot"
        );
        Ok(target)
    }

    /// Loads the newest snapshot of `parser`'s page.
    pub fn load_latest(&self, parser: &dyn DocumentationParser) -> Result<Document> {
        let path = self
            .latest_file(parser.snapshot_file())?
            .ok_or_else(|| ParseError::NoSnapshot(self.root.clone()))?;
        debug!(source = parser.id(), snapshot = %path.display(), "loading snapshot");
        load_document(&path)
    }
}

/// Reads and parses an HTML file.
pub fn load_document(path: &Path) -> Result<Document> {
    let html = fs::read_to_string(path)?;
    Ok(Document::parse(&html))
}

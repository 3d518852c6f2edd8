//! Durable storage for the gallery snapshot.
//!
//! The whole gallery lives in one JSON document (see
//! [`GallerySnapshot`](crate::types::GallerySnapshot) for the shape). The
//! store only ever sees snapshot values; it keeps no reference to the live
//! registry.
//!
//! # Loading
//!
//! A missing file is a first run, not an error. A file that cannot be read or
//! parsed is logged and treated as empty: a damaged snapshot never prevents
//! startup. [`SnapshotStore::try_load`] exposes the underlying error for
//! callers that want to report it.
//!
//! # Saving
//!
//! Writes go to a temporary file in the destination directory which is then
//! renamed over the snapshot. A crash mid-write leaves either the old file or
//! the new one, never a truncated mix. The parent directory is created on
//! demand.
//!
//! # Location
//!
//! By default the snapshot lives in the per-user data directory:
//!
//! ```text
//! Linux:   ~/.local/share/picshelf/gallery.json
//! macOS:   ~/Library/Application Support/picshelf/gallery.json
//! Windows: %APPDATA%\picshelf\gallery.json
//! ```

use crate::types::GallerySnapshot;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

/// File name of the snapshot within its directory.
pub const SNAPSHOT_FILENAME: &str = "gallery.json";

const APP_DIR: &str = "picshelf";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFailure { path: PathBuf, source: io::Error },
    #[error("Snapshot {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailure { path: PathBuf, source: io::Error },
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Default snapshot path in the user's data directory, if one can be found.
pub fn default_snapshot_path() -> Option<PathBuf> {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join(APP_DIR).join(SNAPSHOT_FILENAME))
}

/// Reads and writes the gallery snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store using [`SNAPSHOT_FILENAME`] inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SNAPSHOT_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, reporting why it could not be read.
    ///
    /// A missing file yields an empty snapshot, not an error.
    pub fn try_load(&self) -> Result<GallerySnapshot, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(GallerySnapshot::default());
            }
            Err(source) => {
                return Err(StoreError::ReadFailure {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Load the snapshot. Returns an empty snapshot if the file doesn't exist
    /// or can't be read or parsed.
    pub fn load(&self) -> GallerySnapshot {
        match self.try_load() {
            Ok(snapshot) => {
                debug!(
                    path = %self.path.display(),
                    albums = snapshot.album_data.len(),
                    filters = snapshot.image_filters.len(),
                    "loaded snapshot"
                );
                snapshot
            }
            Err(e) => {
                warn!("{e}; starting with an empty gallery");
                GallerySnapshot::default()
            }
        }
    }

    /// Atomically replace the snapshot file.
    pub fn save(&self, snapshot: &GallerySnapshot) -> Result<(), StoreError> {
        let mut json = serde_json::to_string_pretty(snapshot)?;
        json.push('\n');

        let write_failure = |source: io::Error| StoreError::WriteFailure {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(write_failure)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_failure)?;
        tmp.write_all(json.as_bytes()).map_err(write_failure)?;
        tmp.as_file().sync_all().map_err(write_failure)?;
        tmp.persist(&self.path)
            .map_err(|e| write_failure(e.error))?;

        debug!(path = %self.path.display(), bytes = json.len(), "saved snapshot");
        Ok(())
    }
}

//! File-backed history store
//!
//! One JSON envelope holds the last-seen dependency map of every manifest
//! identity. Loading never fails: a missing file is an empty history and a
//! damaged one is recovered as empty with a warning, so the next gate run
//! reports "changed" and rewrites a clean store.

use crate::atomic::atomic_write;
use crate::codec;
use crate::errors::{io_error, persist_failed, Result};
use depgate_core::model::HistoryRecord;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name used when only a store directory is configured
pub const DEFAULT_STORE_FILE_NAME: &str = "depgate-history.json";

/// How the history came to be in memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    /// Store decoded cleanly
    Loaded { entries: usize },
    /// No store file yet
    Missing,
    /// Store existed but could not be read or decoded
    Recovered { reason: String },
}

/// Loaded record plus its provenance
#[derive(Debug, Clone)]
pub struct LoadedHistory {
    pub record: HistoryRecord,
    pub status: LoadStatus,
}

/// Handle on a single history file
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `dir`/[`DEFAULT_STORE_FILE_NAME`]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_STORE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict load: `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// - `Io`: the file exists but cannot be read
    /// - `CorruptHistory` / `UnsupportedSchema`: see [`codec::decode`]
    pub fn try_load(&self) -> Result<Option<HistoryRecord>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("history_load", e)),
        };
        codec::decode(&bytes).map(Some)
    }

    /// Lenient load that reports why the record is what it is
    pub fn load_detailed(&self) -> LoadedHistory {
        let store_path = self.path.display().to_string();
        match self.try_load() {
            Ok(Some(record)) => {
                let entries = record.len();
                tracing::debug!(op = "history_load", store_path = %store_path, entries, "history loaded");
                LoadedHistory {
                    record,
                    status: LoadStatus::Loaded { entries },
                }
            }
            Ok(None) => {
                tracing::debug!(op = "history_load", store_path = %store_path, "no history file, starting empty");
                LoadedHistory {
                    record: HistoryRecord::new(),
                    status: LoadStatus::Missing,
                }
            }
            Err(err) => {
                tracing::warn!(
                    op = "history_load",
                    store_path = %store_path,
                    err_code = err.code(),
                    reason = %err,
                    "history unreadable, treating as empty"
                );
                LoadedHistory {
                    record: HistoryRecord::new(),
                    status: LoadStatus::Recovered {
                        reason: err.to_string(),
                    },
                }
            }
        }
    }

    /// Lenient load; never fails
    pub fn load(&self) -> HistoryRecord {
        self.load_detailed().record
    }

    /// Overwrite the store with `record`, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` wrapping the encode or IO cause.
    pub fn persist(&self, record: &HistoryRecord) -> Result<()> {
        let store_path = self.path.display().to_string();
        let bytes = codec::encode(record).map_err(|e| persist_failed(&store_path, e))?;
        atomic_write(&self.path, &bytes).map_err(|e| persist_failed(&store_path, e))?;
        tracing::debug!(op = "history_persist", store_path = %store_path, entries = record.len(), "history written");
        Ok(())
    }
}

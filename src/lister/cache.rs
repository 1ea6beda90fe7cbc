//! On-disk fingerprint cache of extracted display names.
//!
//! Entries are keyed by a SHA-256 over the file name and its modification
//! time, so any write to a file produces a fresh key. Stale keys are never
//! pruned, and concurrent writers are not coordinated: the last save wins.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::CacheError;

/// Cached extraction result for one (filename, mtime) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub filename: String,
    pub server_name: String,
}

/// Fingerprint table loaded from and persisted to a single JSON file.
#[derive(Debug)]
pub struct FingerprintCache {
    path: PathBuf,
    entries: BTreeMap<String, CacheEntry>,
    dirty: bool,
}

impl FingerprintCache {
    /// Loads the cache, starting empty when the file is missing or unusable.
    pub fn load(path: &Path) -> Self {
        let entries = match read_entries(path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Ignoring unusable fingerprint cache");
                BTreeMap::new()
            }
        };

        debug!(path = %path.display(), entries = entries.len(), "Loaded fingerprint cache");

        Self {
            path: path.to_path_buf(),
            entries,
            dirty: false,
        }
    }

    pub fn get(&self, fingerprint: &str) -> Option<&CacheEntry> {
        self.entries.get(fingerprint)
    }

    /// Inserts or overwrites an entry and marks the table for saving.
    pub fn insert(&mut self, fingerprint: String, entry: CacheEntry) {
        self.entries.insert(fingerprint, entry);
        self.dirty = true;
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Rewrites the whole cache file if anything was inserted since loading.
    pub fn save_if_dirty(&mut self) -> Result<bool, CacheError> {
        if !self.dirty {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CacheError::WriteFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| CacheError::SerializationFailed(e.to_string()))?;

        std::fs::write(&self.path, json).map_err(|e| CacheError::WriteFailed {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(path = %self.path.display(), entries = self.entries.len(), "Saved fingerprint cache");
        self.dirty = false;
        Ok(true)
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, CacheEntry>, CacheError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => {
            return Err(CacheError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    serde_json::from_str(&content).map_err(|e| CacheError::ParseFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Computes the hex SHA-256 fingerprint of a file name and modification time.
pub fn fingerprint(filename: &str, modified: SystemTime) -> String {
    let modified: DateTime<Utc> = modified.into();
    let mut hasher = Sha256::new();
    hasher.update(filename.as_bytes());
    hasher.update(b"|");
    hasher.update(modified.to_rfc3339_opts(SecondsFormat::Nanos, true).as_bytes());
    hex::encode(hasher.finalize())
}

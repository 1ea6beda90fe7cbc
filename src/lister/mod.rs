//! Listing of active and disabled configuration files.

pub mod cache;
pub mod extract;
pub mod record;

use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::AppConfig;
use crate::error::CacheError;
use crate::mover::CONF_SUFFIX;

use self::cache::{fingerprint, CacheEntry, FingerprintCache};
pub use self::record::{render, ConfigFileRecord, Origin};

/// Counters collected during one scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListingStats {
    /// Display names served from the fingerprint cache.
    pub cache_hits: usize,
    /// Files whose content was read.
    pub content_reads: usize,
    /// Files that could not be read.
    pub read_failures: usize,
}

/// Result of a scan.
#[derive(Debug, Clone)]
pub struct Listing {
    pub records: Vec<ConfigFileRecord>,
    pub stats: ListingStats,
}

/// Scans the active directory then the backup directory.
pub struct Lister<'a> {
    config: &'a AppConfig,
    cache: Option<FingerprintCache>,
    stats: ListingStats,
}

impl<'a> Lister<'a> {
    /// Creates a lister. The cache is used only when configured and `use_cache` is set.
    pub fn new(config: &'a AppConfig, use_cache: bool) -> Self {
        let cache = config
            .cache_file
            .as_deref()
            .filter(|_| use_cache)
            .map(FingerprintCache::load);

        Self {
            config,
            cache,
            stats: ListingStats::default(),
        }
    }

    /// Produces one record per configuration file and persists new cache entries.
    pub fn scan(mut self) -> Result<Listing, CacheError> {
        let config = self.config;
        let mut records = Vec::new();

        self.scan_dir(&config.active_dir, Origin::Active, &mut records);
        self.scan_dir(&config.backup_dir, Origin::Backup, &mut records);

        if let Some(cache) = self.cache.as_mut() {
            if cache.save_if_dirty()? {
                debug!(entries = cache.entry_count(), "Fingerprint cache updated");
            }
        }

        info!(
            records = records.len(),
            cache_hits = self.stats.cache_hits,
            content_reads = self.stats.content_reads,
            read_failures = self.stats.read_failures,
            "Listing complete"
        );

        Ok(Listing {
            records,
            stats: self.stats,
        })
    }

    fn scan_dir(&mut self, dir: &Path, origin: Origin, records: &mut Vec<ConfigFileRecord>) {
        // Entries come out in file-name order.
        let walker = WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // A missing directory contributes nothing.
                    debug!(dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            if !entry.file_name().as_bytes().ends_with(CONF_SUFFIX.as_bytes()) {
                continue;
            }

            let filename = entry.file_name().to_string_lossy().into_owned();
            let server_name = self.display_name(entry.path(), &filename);

            records.push(ConfigFileRecord {
                filename,
                server_name,
                origin,
                dir: dir.to_path_buf(),
            });
        }
    }

    fn display_name(&mut self, path: &Path, filename: &str) -> String {
        let key = match self.cache.as_ref() {
            Some(_) => match std::fs::metadata(path).and_then(|m| m.modified()) {
                Ok(modified) => Some(fingerprint(filename, modified)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "No modification time, bypassing cache");
                    None
                }
            },
            None => None,
        };

        if let (Some(cache), Some(key)) = (self.cache.as_ref(), key.as_deref()) {
            if let Some(hit) = cache.get(key) {
                self.stats.cache_hits += 1;
                return hit.server_name.clone();
            }
        }

        self.stats.content_reads += 1;
        let server_name = match extract::read_server_name(path) {
            Ok(name) => name,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read configuration file");
                self.stats.read_failures += 1;
                return extract::UNKNOWN.to_string();
            }
        };

        if let (Some(cache), Some(key)) = (self.cache.as_mut(), key) {
            cache.insert(
                key,
                CacheEntry {
                    filename: filename.to_string(),
                    server_name: server_name.clone(),
                },
            );
        }

        server_name
    }
}

//! Cache retention sweep
//!
//! Removes per-item cache subdirectories that have not been touched within
//! the retention window. The sweep runs after the primary work of an
//! invocation and swallows every failure: a broken sweep must never take the
//! rendered output down with it.

use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Age threshold applied at the end of every invocation, in days
pub const RETENTION_DAYS: u32 = 30;

/// Deletes top-level cache subdirectories older than a retention window
#[derive(Debug)]
pub struct RetentionSweeper {
    root: PathBuf,
}

impl RetentionSweeper {
    /// Creates a sweeper over the given cache root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Removes every directory whose modification time is strictly older
    /// than `now - retention_days`, returning how many were removed
    ///
    /// Plain files at the root (the seed table) are never touched. Entries
    /// that cannot be inspected or removed are skipped.
    pub fn sweep(&self, now: DateTime<Utc>, retention_days: u32) -> usize {
        let cutoff = now - Duration::days(i64::from(retention_days));
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(%err, root = %self.root.display(), "cache root not listable, skipping sweep");
                return 0;
            }
        };

        let mut removed = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            if !Self::is_older_than(&path, cutoff) {
                continue;
            }
            match fs::remove_dir_all(&path) {
                Ok(()) => {
                    debug!(path = %path.display(), "removed expired cache entry");
                    removed += 1;
                }
                Err(err) => debug!(%err, path = %path.display(), "failed to remove cache entry"),
            }
        }
        removed
    }

    fn is_older_than(path: &Path, cutoff: DateTime<Utc>) -> bool {
        let Ok(metadata) = fs::metadata(path) else {
            return false;
        };
        let Ok(modified) = metadata.modified() else {
            return false;
        };
        DateTime::<Utc>::from(modified) < cutoff
    }
}

//! Persistent keyed cache store
//!
//! Provides a `CacheStore` that keeps one subdirectory per entry key, each
//! holding a JSON data file wrapped in a snapshot envelope and/or a raw image
//! file. Reads report an explicit found/absent/corrupt outcome so callers can
//! degrade gracefully instead of treating a damaged file as a hard failure.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Entry key under which the full catalog snapshot is stored
pub const CATALOG_KEY: &str = "full";

/// Wrapper struct for cached data stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot<T> {
    /// The cached data
    data: T,
    /// When the data was cached
    cached_at: DateTime<Utc>,
}

/// Result of reading a data entry from the cache
#[derive(Debug)]
pub enum CacheRead<T> {
    /// The entry exists and parsed cleanly
    Found {
        data: T,
        /// When the data was originally cached
        cached_at: DateTime<Utc>,
    },
    /// No entry is stored under the key
    Absent,
    /// An entry is stored but its contents cannot be parsed
    Corrupt,
}

/// Manages reading and writing keyed cache entries on disk
///
/// The store keeps its entries in an XDG-compliant cache directory
/// (`~/.cache/amiiboday/` on Linux). Layout: one subdirectory per key,
/// holding `<key>-data.json` and/or `<key>-image.png`, plus loose files
/// (the random seed table) directly at the root.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Root directory for all cache entries
    root: PathBuf,
}

impl CacheStore {
    /// Creates a new CacheStore using the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no
    /// home directory).
    pub fn open_default() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "amiiboday")?;
        let root = project_dirs.cache_dir().to_path_buf();
        Some(Self { root })
    }

    /// Creates a new CacheStore rooted at a custom directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// Returns the root directory of the cache
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the subdirectory holding the entry for the given key
    fn entry_dir(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Returns the path of the data file for the given key
    fn data_path(&self, key: &str) -> PathBuf {
        self.entry_dir(key).join(format!("{}-data.json", key))
    }

    /// Returns the path of the image file for the given key
    fn image_path(&self, key: &str) -> PathBuf {
        self.entry_dir(key).join(format!("{}-image.png", key))
    }

    /// Reads a data entry from the cache
    ///
    /// # Returns
    /// * `CacheRead::Found` with the data and its original cache timestamp
    /// * `CacheRead::Absent` if no file is stored under the key
    /// * `CacheRead::Corrupt` if the file exists but cannot be parsed
    pub fn read_data<T: DeserializeOwned>(&self, key: &str) -> CacheRead<T> {
        let path = self.data_path(key);
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return CacheRead::Absent,
        };
        match serde_json::from_str::<Snapshot<T>>(&content) {
            Ok(snapshot) => CacheRead::Found {
                data: snapshot.data,
                cached_at: snapshot.cached_at,
            },
            Err(_) => CacheRead::Corrupt,
        }
    }

    /// Writes a data entry, stamping it with the current time
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation or file writing fails
    pub fn write_data<T: Serialize>(&self, key: &str, data: &T) -> io::Result<()> {
        fs::create_dir_all(self.entry_dir(key))?;

        let snapshot = Snapshot {
            data,
            cached_at: Utc::now(),
        };
        let json = serde_json::to_string(&snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        fs::write(self.data_path(key), json)
    }

    /// Removes the data file for the given key, leaving any image in place
    pub fn remove_data(&self, key: &str) -> io::Result<()> {
        fs::remove_file(self.data_path(key))
    }

    /// Reads an image entry as raw bytes
    ///
    /// Returns `None` if no image is stored under the key.
    pub fn read_image(&self, key: &str) -> Option<Vec<u8>> {
        fs::read(self.image_path(key)).ok()
    }

    /// Writes an image entry as raw bytes
    pub fn write_image(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(self.entry_dir(key))?;
        fs::write(self.image_path(key), bytes)
    }
}

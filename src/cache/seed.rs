//! Persistent random seed table
//!
//! One uniform [0,1) value per (day number, hour bucket) pair, generated
//! lazily the first time a day is seen and reused verbatim for every later
//! read on the same day. Reuse is what keeps repeated invocations within the
//! same interval showing the same item.

use rand::Rng;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the seed table at the cache root
pub const SEED_FILE_NAME: &str = "randomseed.json";

/// Mapping from day number to per-hour-bucket random values
pub type SeedTable = BTreeMap<i64, BTreeMap<u32, f64>>;

/// Reads and writes the persisted seed table
#[derive(Debug, Clone)]
pub struct SeedStore {
    path: PathBuf,
}

impl SeedStore {
    /// Creates a SeedStore for the seed file under the given cache root
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join(SEED_FILE_NAME),
        }
    }

    /// Returns a table guaranteed to contain an entry for `day`
    ///
    /// The persisted table is returned verbatim when it already covers the
    /// day. A missing file, a corrupt file, or a table for some other day all
    /// yield a freshly generated table holding only `day`.
    pub fn seed_for_day(&self, day: i64) -> SeedTable {
        if let Ok(content) = fs::read_to_string(&self.path) {
            match serde_json::from_str::<SeedTable>(&content) {
                Ok(table) if table.contains_key(&day) => return table,
                Ok(_) => debug!(day, "seed table has no entry for today, regenerating"),
                Err(err) => debug!(%err, "seed table is corrupt, regenerating"),
            }
        }
        generate(day)
    }

    /// Persists the table verbatim, overwriting any prior state
    ///
    /// Days not present in `table` are dropped from disk. Only the current
    /// day is ever read back, so the file stays one entry large.
    pub fn save(&self, table: &SeedTable) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(table)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}

/// Generates a fresh table for `day`: 24 uniform [0,1) values, one per hour
fn generate(day: i64) -> SeedTable {
    let mut rng = rand::rng();
    let buckets: BTreeMap<u32, f64> = (0..24).map(|hour| (hour, rng.random::<f64>())).collect();
    BTreeMap::from([(day, buckets)])
}

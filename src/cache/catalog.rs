//! Catalog snapshot and image cache
//!
//! The full catalog is persisted as a single snapshot under the `"full"`
//! key and mirrored in memory for lookups. The snapshot is valid for one
//! calendar day: a snapshot cached on an earlier local date is deleted on
//! load, forcing one re-fetch per day. Images are cached per item id and
//! treated as immutable once stored.

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, warn};

use super::store::{CacheRead, CacheStore, CATALOG_KEY};
use crate::data::{Amiibo, Catalog, ItemKey};

/// Errors from resolving an item identifier against the catalog
#[derive(Debug, Error)]
pub enum LookupError {
    /// Numeric identifier outside the catalog bounds
    #[error("no item at index {index} (catalog has {size} entries)")]
    IndexOutOfBounds { index: usize, size: usize },

    /// Pinned name with no exact match in the catalog
    #[error("no item named {0:?} in the catalog")]
    NameNotFound(String),
}

/// Persistent catalog snapshot plus in-memory mirror
#[derive(Debug)]
pub struct CatalogCache {
    store: CacheStore,
    /// In-memory mirror of the last loaded or stored catalog
    catalog: Catalog,
}

impl CatalogCache {
    /// Creates an empty CatalogCache over the given store
    pub fn new(store: CacheStore) -> Self {
        Self {
            store,
            catalog: Catalog::new(),
        }
    }

    /// Loads the persisted snapshot into the mirror
    ///
    /// A snapshot cached on a calendar date strictly before `today` is
    /// deleted and reported absent (year/month/day comparison, not elapsed
    /// time). A corrupt snapshot is likewise deleted and reported absent.
    pub fn load_catalog(&mut self, today: NaiveDate) -> Option<&[Amiibo]> {
        match self.store.read_data::<Catalog>(CATALOG_KEY) {
            CacheRead::Found { data, cached_at } => {
                if cached_at.with_timezone(&Local).date_naive() < today {
                    debug!("catalog snapshot predates today, deleting");
                    self.discard_snapshot();
                    None
                } else {
                    self.catalog = data;
                    Some(&self.catalog)
                }
            }
            CacheRead::Absent => None,
            CacheRead::Corrupt => {
                warn!("catalog snapshot is corrupt, deleting");
                self.discard_snapshot();
                None
            }
        }
    }

    /// Persists the catalog and updates the mirror
    ///
    /// The mirror is updated even when the write fails, so lookups keep
    /// working for the rest of the invocation.
    pub fn store_catalog(&mut self, catalog: Catalog) -> std::io::Result<()> {
        let result = self.store.write_data(CATALOG_KEY, &catalog);
        self.catalog = catalog;
        result
    }

    /// Number of entries in the mirrored catalog
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Whether the mirrored catalog is empty
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Resolves an identifier against the mirrored catalog
    ///
    /// A name hit gets its positional index assigned as `id`; a numeric
    /// identifier is validated against the catalog bounds.
    pub fn lookup(&self, key: &ItemKey) -> Result<Amiibo, LookupError> {
        match key {
            ItemKey::Index(index) => {
                let mut item = self
                    .catalog
                    .get(*index)
                    .cloned()
                    .ok_or(LookupError::IndexOutOfBounds {
                        index: *index,
                        size: self.catalog.len(),
                    })?;
                item.id = *index;
                Ok(item)
            }
            ItemKey::Name(name) => {
                let index = self
                    .catalog
                    .iter()
                    .position(|item| item.name == *name)
                    .ok_or_else(|| LookupError::NameNotFound(name.clone()))?;
                let mut item = self.catalog[index].clone();
                item.id = index;
                Ok(item)
            }
        }
    }

    /// Reads the cached image for an item id, with no staleness check
    pub fn load_image(&self, id: usize) -> Option<Vec<u8>> {
        self.store.read_image(&id.to_string())
    }

    /// Stores the image for an item id
    pub fn store_image(&self, id: usize, bytes: &[u8]) -> std::io::Result<()> {
        self.store.write_image(&id.to_string(), bytes)
    }

    fn discard_snapshot(&mut self) {
        if let Err(err) = self.store.remove_data(CATALOG_KEY) {
            warn!(%err, "failed to delete catalog snapshot");
        }
    }
}

//! On-disk caching for catalog data, images, and random seeds
//!
//! All persistent state lives under one cache root: the full catalog
//! snapshot and per-item images in keyed subdirectories, the seed table as a
//! loose file, with a retention sweep over the subdirectories.

pub mod catalog;
pub mod retention;
pub mod seed;
pub mod store;

pub use catalog::{CatalogCache, LookupError};
pub use retention::{RetentionSweeper, RETENTION_DAYS};
pub use seed::{SeedStore, SeedTable, SEED_FILE_NAME};
pub use store::{CacheRead, CacheStore};

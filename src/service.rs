//! Catalog data service
//!
//! Composes the persistent cache with the API client in a cache-then-fetch
//! pattern. Fetch and parse failures degrade to absent values: callers treat
//! "no data" as an expected outcome and fall back to the error card.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::cache::{CatalogCache, LookupError};
use crate::data::{Amiibo, AmiiboApi, ItemKey};

/// Cache-or-fetch orchestration for catalog data and images
#[derive(Debug)]
pub struct CatalogService {
    cache: CatalogCache,
    api: AmiiboApi,
}

impl CatalogService {
    /// Creates a service over the given cache and API client
    pub fn new(cache: CatalogCache, api: AmiiboApi) -> Self {
        Self { cache, api }
    }

    /// Makes the full catalog available, returning its size
    ///
    /// A fresh cached snapshot wins; otherwise the catalog is fetched,
    /// persisted, and mirrored. Returns `None` when neither the cache nor
    /// the fetch can produce a catalog.
    pub async fn ensure_catalog(&mut self, today: NaiveDate) -> Option<usize> {
        if let Some(catalog) = self.cache.load_catalog(today) {
            debug!(items = catalog.len(), "catalog loaded from cache");
            return Some(catalog.len());
        }

        match self.api.fetch_catalog().await {
            Ok(catalog) => {
                debug!(items = catalog.len(), "catalog fetched from API");
                if let Err(err) = self.cache.store_catalog(catalog) {
                    warn!(%err, "failed to persist catalog snapshot");
                }
                Some(self.cache.len())
            }
            Err(err) => {
                warn!(%err, "catalog fetch failed");
                None
            }
        }
    }

    /// Resolves an item identifier against the mirrored catalog
    pub fn resolve_item(&self, key: &ItemKey) -> Result<Amiibo, LookupError> {
        self.cache.lookup(key)
    }

    /// Returns the image for an item, from cache or by fetching `url`
    ///
    /// A successful fetch is written back to the cache before returning.
    pub async fn resolve_image(&mut self, id: usize, url: &str) -> Option<Vec<u8>> {
        if let Some(bytes) = self.cache.load_image(id) {
            debug!(id, "image loaded from cache");
            return Some(bytes);
        }

        match self.api.fetch_image(url).await {
            Ok(bytes) => {
                if let Err(err) = self.cache.store_image(id, &bytes) {
                    warn!(%err, id, "failed to persist image");
                }
                Some(bytes)
            }
            Err(err) => {
                warn!(%err, url, "image fetch failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::data::Catalog;
    use chrono::{Duration, Local};
    use tempfile::TempDir;

    fn sample_catalog() -> Catalog {
        vec![
            Amiibo {
                id: 0,
                name: "Bowser".to_string(),
                image: "https://example.com/bowser.png".to_string(),
                character: "Bowser".to_string(),
                game_series: "Super Mario".to_string(),
                amiibo_series: "Super Smash Bros.".to_string(),
                kind: "Figure".to_string(),
            },
            Amiibo {
                id: 0,
                name: "Mario".to_string(),
                image: "https://example.com/mario.png".to_string(),
                character: "Mario".to_string(),
                game_series: "Super Mario".to_string(),
                amiibo_series: "Super Mario Bros.".to_string(),
                kind: "Figure".to_string(),
            },
        ]
    }

    /// API client pointed at the discard port so any fetch fails fast
    fn unreachable_api() -> AmiiboApi {
        AmiiboApi::new().with_base_url("http://127.0.0.1:9/api/amiibo/")
    }

    fn create_test_service() -> (CatalogService, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CatalogCache::new(CacheStore::with_root(temp_dir.path().to_path_buf()));
        (CatalogService::new(cache, unreachable_api()), temp_dir)
    }

    #[tokio::test]
    async fn test_ensure_catalog_prefers_fresh_cache_over_fetch() {
        let (mut service, _temp_dir) = create_test_service();
        let today = Local::now().date_naive();
        service
            .cache
            .store_catalog(sample_catalog())
            .expect("Store should succeed");

        // The API is unreachable, so a hit proves the cache was used
        assert_eq!(service.ensure_catalog(today).await, Some(2));
    }

    #[tokio::test]
    async fn test_ensure_catalog_degrades_to_none_when_fetch_fails() {
        let (mut service, _temp_dir) = create_test_service();
        let today = Local::now().date_naive();

        assert_eq!(service.ensure_catalog(today).await, None);
    }

    #[tokio::test]
    async fn test_stale_snapshot_forces_a_fetch() {
        let (mut service, temp_dir) = create_test_service();
        let tomorrow = Local::now().date_naive() + Duration::days(1);
        service
            .cache
            .store_catalog(sample_catalog())
            .expect("Store should succeed");

        // Stale snapshot plus unreachable API leaves nothing to show
        assert_eq!(service.ensure_catalog(tomorrow).await, None);
        assert!(
            !temp_dir.path().join("full").join("full-data.json").exists(),
            "Stale snapshot must be deleted on the way"
        );
    }

    #[tokio::test]
    async fn test_resolve_image_hits_the_cache_before_fetching() {
        let (mut service, _temp_dir) = create_test_service();
        let bytes = vec![1, 2, 3, 4];
        service
            .cache
            .store_image(1, &bytes)
            .expect("Store should succeed");

        let resolved = service.resolve_image(1, "http://127.0.0.1:9/mario.png").await;

        assert_eq!(resolved, Some(bytes));
    }

    #[tokio::test]
    async fn test_resolve_image_degrades_to_none_when_fetch_fails() {
        let (mut service, _temp_dir) = create_test_service();

        let resolved = service.resolve_image(1, "http://127.0.0.1:9/mario.png").await;

        assert_eq!(resolved, None);
    }

    #[tokio::test]
    async fn test_resolve_item_propagates_typed_lookup_errors() {
        let (mut service, _temp_dir) = create_test_service();
        service
            .cache
            .store_catalog(sample_catalog())
            .expect("Store should succeed");

        assert!(service.resolve_item(&ItemKey::Index(1)).is_ok());
        assert!(matches!(
            service.resolve_item(&ItemKey::Name("Waluigi".to_string())),
            Err(LookupError::NameNotFound(_))
        ));
    }
}

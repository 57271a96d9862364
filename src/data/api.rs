//! amiiboapi.com API client
//!
//! This module provides functionality to fetch the full amiibo catalog and
//! per-item images from the remote API. The catalog is served in two
//! partitions (figures and yarn) that are concatenated into one sequence.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{Amiibo, Catalog};

/// Base URL for the amiibo API
const AMIIBO_API_BASE_URL: &str = "https://amiiboapi.com/api/amiibo/";

/// The catalog partitions served by the API, concatenated in this order so
/// positional ids stay stable across fetches
const CATALOG_PARTITIONS: [&str; 2] = ["Figure", "Yarn"];

/// Errors that can occur when fetching catalog data or images
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Envelope the API wraps each catalog partition in
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    amiibo: Vec<Amiibo>,
}

/// Client for fetching amiibo data from amiiboapi.com
#[derive(Debug, Clone)]
pub struct AmiiboApi {
    client: Client,
    base_url: String,
}

impl Default for AmiiboApi {
    fn default() -> Self {
        Self::new()
    }
}

impl AmiiboApi {
    /// Create a new AmiiboApi client with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: AMIIBO_API_BASE_URL.to_string(),
        }
    }

    /// Create a new AmiiboApi client with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: AMIIBO_API_BASE_URL.to_string(),
        }
    }

    /// Create a new AmiiboApi client with a custom base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the full catalog as one ordered sequence
    ///
    /// The two partitions are fetched on the same task and concatenated in
    /// fixed order regardless of which response arrives first.
    ///
    /// # Returns
    /// * `Ok(Catalog)` - All catalog entries, figures first
    /// * `Err(ApiError)` - If either request or parse fails
    pub async fn fetch_catalog(&self) -> Result<Catalog, ApiError> {
        let [figures, yarn] = CATALOG_PARTITIONS;
        let (mut catalog, yarn_entries) = futures::future::try_join(
            self.fetch_partition(figures),
            self.fetch_partition(yarn),
        )
        .await?;
        catalog.extend(yarn_entries);
        Ok(catalog)
    }

    /// Fetch one catalog partition by product kind
    async fn fetch_partition(&self, kind: &str) -> Result<Vec<Amiibo>, ApiError> {
        let url = format!("{}?type={}", self.base_url, kind);

        let response = self.client.get(&url).send().await?;
        let text = response.text().await?;
        let parsed: CatalogResponse = serde_json::from_str(&text)?;

        Ok(parsed.amiibo)
    }

    /// Fetch an image as raw bytes
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.client.get(url).send().await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

//! Product catalog client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`: `GET {base}/products` and `GET {base}/products/{id}`
//! - The catalog is the source of truth; nothing is synced locally
//! - In-memory caching via `moka` for API responses (TTL from config)
//!
//! # Example
//!
//! ```rust,ignore
//! use fakestore_storefront::catalog::CatalogClient;
//!
//! let catalog = CatalogClient::new(&config.catalog);
//! let product = catalog.get_product(&ProductId::Number(1)).await?;
//! cart.add_to_cart(&product);
//! ```

mod cache;

use std::sync::Arc;

use fakestore_core::{Product, ProductId};
use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;
use cache::{CacheKey, CacheValue};

/// How much of an unexpected response body is kept in errors.
const ERROR_BODY_LIMIT: usize = 200;
/// How much of an unexpected response body is logged.
const LOG_BODY_LIMIT: usize = 500;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the catalog.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The catalog answered with an unexpected status.
    #[error("Unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The configured base URL cannot have paths appended.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// Client for the product catalog API.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Option<Cache<CacheKey, CacheValue>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// A zero `cache_ttl` disables caching.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = (!config.cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(config.cache_ttl)
                .build()
        });

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                cache,
            }),
        }
    }

    /// Get every product in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) = self.cached(&CacheKey::Products).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let url = self.endpoint(&["products"])?;
        let products: Vec<Product> = self.get_json(url).await?.unwrap_or_default();

        self.store(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the catalog has no such product,
    /// or another error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let cache_key = CacheKey::Product(id.clone());

        if let Some(CacheValue::Product(product)) = self.cached(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = self.endpoint(&["products", &id.to_string()])?;
        let product: Product = self
            .get_json(url)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Product not found: {id}")))?;

        self.store(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    async fn cached(&self, key: &CacheKey) -> Option<CacheValue> {
        match &self.inner.cache {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    async fn store(&self, key: CacheKey, value: CacheValue) {
        if let Some(cache) = &self.inner.cache {
            cache.insert(key, value).await;
        }
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a JSON document.
    ///
    /// Returns `Ok(None)` for a 404 and for an empty or `null` body, which
    /// is how the public catalog answers unknown ids.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, CatalogError> {
        let response = self
            .inner
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(&body, LOG_BODY_LIMIT),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status,
                body: excerpt(&body, ERROR_BODY_LIMIT),
            });
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str::<Option<T>>(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&body, LOG_BODY_LIMIT),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }
}

fn excerpt(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}

/// Distinct product categories, in the order they first appear.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !product.category.is_empty() && !seen.contains(&product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use fakestore_core::Price;

    use super::*;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            base_url: Url::parse(base).unwrap(),
            cache_ttl: Duration::ZERO,
        })
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let url = client("https://fakestoreapi.com")
            .endpoint(&["products", "1"])
            .unwrap();
        assert_eq!(url.as_str(), "https://fakestoreapi.com/products/1");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = client("http://localhost:9000/api/")
            .endpoint(&["products"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/products");
    }

    #[test]
    fn test_endpoint_encodes_text_ids() {
        let url = client("https://fakestoreapi.com")
            .endpoint(&["products", "a b/c"])
            .unwrap();
        assert_eq!(url.as_str(), "https://fakestoreapi.com/products/a%20b%2Fc");
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let mut a = Product::new(1, "A", Price::from_cents(100));
        a.category = "jewelery".to_string();
        let mut b = Product::new(2, "B", Price::from_cents(100));
        b.category = "electronics".to_string();
        let mut c = Product::new(3, "C", Price::from_cents(100));
        c.category = "jewelery".to_string();
        let d = Product::new(4, "D", Price::from_cents(100));

        assert_eq!(categories(&[a, b, c, d]), vec!["jewelery", "electronics"]);
    }

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("Product not found: 99".to_string());
        assert_eq!(err.to_string(), "Not found: Product not found: 99");

        let err = CatalogError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}

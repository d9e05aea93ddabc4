//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CATALOG_BASE_URL` - Product catalog API root (default: <https://fakestoreapi.com>)
//! - `CATALOG_CACHE_TTL_SECS` - How long catalog responses are cached (default: 300)
//! - `CART_STORAGE_DIR` - Directory holding the persisted cart (default: .fakestore)
//! - `CART_SLOT_KEY` - Name of the cart slot (default: cart)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::storage::validate_slot_key;

const DEFAULT_CATALOG_BASE_URL: &str = "https://fakestoreapi.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Product catalog configuration
    pub catalog: CatalogConfig,
    /// Cart persistence configuration
    pub cart: CartConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., production, staging)
    pub sentry_environment: Option<String>,
}

/// Product catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root; product endpoints live under `{base_url}/products`
    pub base_url: Url,
    /// Time-to-live for cached catalog responses
    pub cache_ttl: Duration,
}

/// Where the cart is persisted.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Directory holding slot files
    pub storage_dir: PathBuf,
    /// Slot name; the cart lives in `{storage_dir}/{slot_key}.json`
    pub slot_key: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let host = env
            .or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| invalid("STOREFRONT_HOST", e))?;
        let port = env
            .or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| invalid("STOREFRONT_PORT", e))?;

        Ok(Self {
            host,
            port,
            catalog: CatalogConfig::from_env(&env)?,
            cart: CartConfig::from_env(&env)?,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&env.or_default("CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL))
            .map_err(|e| invalid("CATALOG_BASE_URL", e))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid("CATALOG_BASE_URL", "must be an http(s) URL"));
        }

        let ttl_secs = env
            .or_default("CATALOG_CACHE_TTL_SECS", "300")
            .parse::<u64>()
            .map_err(|e| invalid("CATALOG_CACHE_TTL_SECS", e))?;

        Ok(Self {
            base_url,
            cache_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

impl CartConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let slot_key = env.or_default("CART_SLOT_KEY", fakestore_core::cart::CART_SLOT_KEY);
        validate_slot_key(&slot_key).map_err(|e| invalid("CART_SLOT_KEY", e))?;

        Ok(Self {
            storage_dir: PathBuf::from(env.or_default("CART_STORAGE_DIR", ".fakestore")),
            slot_key,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source with the default/optional helpers.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable; empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

fn invalid(key: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.catalog.base_url.as_str(), "https://fakestoreapi.com/");
        assert_eq!(config.catalog.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.cart.storage_dir, PathBuf::from(".fakestore"));
        assert_eq!(config.cart.slot_key, "cart");
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("CATALOG_BASE_URL", "http://localhost:9000/api"),
            ("CATALOG_CACHE_TTL_SECS", "0"),
            ("CART_STORAGE_DIR", "/tmp/carts"),
            ("CART_SLOT_KEY", "cart-v2"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.catalog.base_url.as_str(), "http://localhost:9000/api");
        assert_eq!(config.catalog.cache_ttl, Duration::ZERO);
        assert_eq!(config.cart.storage_dir, PathBuf::from("/tmp/carts"));
        assert_eq!(config.cart.slot_key, "cart-v2");
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_empty_value_uses_default() {
        let config = load(&[("STOREFRONT_PORT", "  ")]).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("STOREFRONT_PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("STOREFRONT_PORT"));
    }

    #[test]
    fn test_invalid_catalog_url() {
        assert!(load(&[("CATALOG_BASE_URL", "not a url")]).is_err());
        assert!(load(&[("CATALOG_BASE_URL", "mailto:shop@example.com")]).is_err());
        assert!(load(&[("CATALOG_BASE_URL", "ftp://example.com")]).is_err());
    }

    #[test]
    fn test_invalid_slot_key() {
        let err = load(&[("CART_SLOT_KEY", "../escape")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "CART_SLOT_KEY"));
    }
}

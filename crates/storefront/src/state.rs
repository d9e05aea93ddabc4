//! Application state shared across handlers.

use std::sync::Arc;

use fakestore_core::cart::{CartStore, SlotStorage};
use tokio::sync::Mutex;

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::storage::FileStorage;

/// The cart store as held by the server.
pub type SharedCartStore = CartStore<Arc<dyn SlotStorage>>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cart store sits behind an
/// async mutex so concurrent requests are applied one at a time. Mutations
/// write the slot synchronously, so they run on the blocking pool via
/// [`AppState::update_cart`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cart: Arc<Mutex<SharedCartStore>>,
}

impl AppState {
    /// Create application state with the cart persisted under the configured
    /// storage directory.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let storage = Arc::new(FileStorage::new(&config.cart.storage_dir));
        Self::with_storage(config, storage)
    }

    /// Create application state with an explicit storage backend.
    #[must_use]
    pub fn with_storage(config: StorefrontConfig, storage: Arc<dyn SlotStorage>) -> Self {
        let catalog = CatalogClient::new(&config.catalog);
        let cart = CartStore::with_slot_key(storage, config.cart.slot_key.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Arc::new(Mutex::new(cart)),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get the cart store for reading. Use [`AppState::update_cart`] to
    /// change it.
    #[must_use]
    pub fn cart(&self) -> &Mutex<SharedCartStore> {
        &self.inner.cart
    }

    /// Run one cart mutation on the blocking pool while holding the lock.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the mutation panicked.
    pub async fn update_cart<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SharedCartStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let cart = Arc::clone(&self.inner.cart);
        tokio::task::spawn_blocking(move || {
            let mut store = cart.blocking_lock();
            f(&mut store)
        })
        .await
        .map_err(|e| AppError::Internal(format!("cart update failed: {e}")))
    }
}

//! The cart state container.

use std::sync::Arc;

use tracing::instrument;

use super::{CartState, SlotStorage};
use crate::types::{Product, ProductId};

/// Slot the cart is persisted under unless configured otherwise.
pub const CART_SLOT_KEY: &str = "cart";

/// Owns the current [`CartState`] and mirrors it to a storage slot.
///
/// Construct one per session with [`CartStore::initialize`] and hand it to
/// whatever needs the cart. Mutations take `&mut self`: the store has a single
/// writer.
///
/// Every mutation writes the whole cart to the slot before returning. Storage
/// failures are logged and otherwise ignored, both on load and on save: the
/// in-memory state stays authoritative and no operation returns an error.
pub struct CartStore<S> {
    storage: S,
    slot_key: String,
    state: Arc<CartState>,
}

impl<S: SlotStorage> CartStore<S> {
    /// Load the cart from the default slot.
    ///
    /// A missing, unreadable, or malformed slot yields an empty cart.
    pub fn initialize(storage: S) -> Self {
        Self::with_slot_key(storage, CART_SLOT_KEY)
    }

    /// Load the cart from a named slot.
    pub fn with_slot_key(storage: S, slot_key: impl Into<String>) -> Self {
        let slot_key = slot_key.into();
        let state = load_state(&storage, &slot_key);
        tracing::debug!(slot = %slot_key, items = state.len(), "Cart loaded");

        Self {
            storage,
            slot_key,
            state: Arc::new(state),
        }
    }

    /// The current cart.
    ///
    /// The returned snapshot is never modified by later operations.
    #[must_use]
    pub fn state(&self) -> Arc<CartState> {
        Arc::clone(&self.state)
    }

    #[must_use]
    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Add one unit of `product`.
    ///
    /// If the product is already in the cart its quantity goes up by one and
    /// its stored fields are left as they were when it was first added.
    #[instrument(level = "debug", skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: &Product) -> Arc<CartState> {
        let next = self.state.with_product_added(product);
        self.commit(next)
    }

    /// Set the quantity for `id`.
    ///
    /// Unknown ids are ignored. A quantity below 1 removes the item.
    #[instrument(level = "debug", skip(self), fields(product_id = %id))]
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> Arc<CartState> {
        let next = self.state.with_quantity(id, quantity);
        self.commit(next)
    }

    /// Remove `id` from the cart, if present.
    #[instrument(level = "debug", skip(self), fields(product_id = %id))]
    pub fn remove_from_cart(&mut self, id: &ProductId) -> Arc<CartState> {
        let next = self.state.without(id);
        self.commit(next)
    }

    /// Empty the cart.
    #[instrument(level = "debug", skip(self))]
    pub fn clear_cart(&mut self) -> Arc<CartState> {
        self.commit(CartState::new())
    }

    fn commit(&mut self, next: CartState) -> Arc<CartState> {
        self.state = Arc::new(next);
        self.persist();
        self.state()
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&*self.state) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(slot = %self.slot_key, error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.storage.write(&self.slot_key, &json) {
            tracing::warn!(
                slot = %self.slot_key,
                error = %e,
                "Failed to persist cart; keeping in-memory state"
            );
        }
    }
}

fn load_state(storage: &impl SlotStorage, slot_key: &str) -> CartState {
    let raw = match storage.read(slot_key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return CartState::new(),
        Err(e) => {
            tracing::warn!(slot = %slot_key, error = %e, "Failed to read persisted cart");
            return CartState::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(
            slot = %slot_key,
            error = %e,
            "Persisted cart is malformed; starting empty"
        );
        CartState::new()
    })
}

//! The complete cart at a point in time.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::LineItem;
use crate::types::{Price, Product, ProductId};

/// A persisted cart listed the same product twice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate line item for product {0}")]
pub struct DuplicateLineItem(pub ProductId);

/// An ordered list of line items, unique by product id.
///
/// Values are immutable: every operation returns a new `CartState` and leaves
/// `self` untouched. Insertion order is kept for display only.
///
/// Serialized as a JSON array of [`LineItem`]. Deserializing an array that
/// repeats an id fails with [`DuplicateLineItem`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up the line item for `id`.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Find the id of the line that `id` refers to.
    ///
    /// An exact match wins. Otherwise a line whose id displays the same (a
    /// `"42"` string id for a parsed `42`) is matched, so ids that went
    /// through a form field or command line still find their line.
    #[must_use]
    pub fn resolve_id(&self, id: &ProductId) -> Option<&ProductId> {
        if let Some(item) = self.get(id) {
            return Some(item.id());
        }
        let text = id.to_string();
        self.items
            .iter()
            .map(LineItem::id)
            .find(|candidate| candidate.to_string() == text)
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Add one unit of `product`.
    ///
    /// An existing line for the same id has its quantity bumped and keeps the
    /// snapshot it was created with; otherwise a new line is appended.
    #[must_use]
    pub fn with_product_added(&self, product: &Product) -> Self {
        if self.contains(&product.id) {
            return self.map_item(&product.id, LineItem::incremented);
        }

        let mut items = self.items.clone();
        items.push(LineItem::new(product));
        Self { items }
    }

    /// Set the quantity of an existing line.
    ///
    /// Unknown ids leave the cart unchanged. A quantity below 1 removes the
    /// line. Quantities above `u32::MAX` are clamped.
    #[must_use]
    pub fn with_quantity(&self, id: &ProductId, quantity: i64) -> Self {
        if quantity < 1 {
            return self.without(id);
        }

        let clamped = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(quantity) = NonZeroU32::new(clamped) else {
            return self.without(id);
        };
        self.map_item(id, |item| item.with_quantity(quantity))
    }

    /// Remove the line for `id`, if any.
    #[must_use]
    pub fn without(&self, id: &ProductId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.id() != id)
                .cloned()
                .collect(),
        }
    }

    fn map_item(&self, id: &ProductId, f: impl Fn(&LineItem) -> LineItem) -> Self {
        Self {
            items: self
                .items
                .iter()
                .map(|item| if item.id() == id { f(item) } else { item.clone() })
                .collect(),
        }
    }
}

impl TryFrom<Vec<LineItem>> for CartState {
    type Error = DuplicateLineItem;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        for (i, item) in items.iter().enumerate() {
            if items.iter().skip(i + 1).any(|other| other.id() == item.id()) {
                return Err(DuplicateLineItem(item.id().clone()));
            }
        }
        Ok(Self { items })
    }
}

impl From<CartState> for Vec<LineItem> {
    fn from(state: CartState) -> Self {
        state.items
    }
}

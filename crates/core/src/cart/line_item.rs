//! One product in the cart.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// Field name used for the quantity in the persisted record.
const QUANTITY_FIELD: &str = "quantity";

/// A product snapshot plus the requested quantity.
///
/// The product fields are copied when the item is first added and are never
/// refreshed from the catalog afterwards. The quantity is non-zero by
/// construction; a persisted record with `"quantity": 0` fails to parse.
///
/// Serialized as a single flat object: the product fields followed by
/// `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    product: Product,
    quantity: NonZeroU32,
}

impl LineItem {
    /// Snapshot `product` into a new line item with quantity 1.
    #[must_use]
    pub fn new(product: &Product) -> Self {
        let mut snapshot = product.clone();
        // A stray `quantity` in the catalog record would collide with ours.
        snapshot.extra.remove(QUANTITY_FIELD);
        Self {
            product: snapshot,
            quantity: NonZeroU32::MIN,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// The product snapshot taken when the item was added.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.quantity())
    }

    /// A copy of this item with a different quantity.
    #[must_use]
    pub fn with_quantity(&self, quantity: NonZeroU32) -> Self {
        Self {
            product: self.product.clone(),
            quantity,
        }
    }

    /// A copy of this item with the quantity raised by one.
    #[must_use]
    pub fn incremented(&self) -> Self {
        self.with_quantity(self.quantity.saturating_add(1))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn product() -> Product {
        Product::new(1, "A", Price::from_cents(999))
    }

    #[test]
    fn test_new_item_has_quantity_one() {
        let item = LineItem::new(&product());
        assert_eq!(item.quantity(), 1);
        assert_eq!(item.id(), &ProductId::Number(1));
    }

    #[test]
    fn test_serialized_as_flat_object() {
        let item = LineItem::new(&product()).incremented();
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "title": "A",
                "price": 9.99,
                "description": "",
                "category": "",
                "image": "",
                "quantity": 2
            })
        );
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let result: Result<LineItem, _> =
            serde_json::from_str(r#"{"id": 1, "title": "A", "price": 1, "quantity": 0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_quantity_field_is_dropped() {
        let mut p = product();
        p.extra.insert("quantity".to_string(), Value::from(40));
        let item = LineItem::new(&p);
        assert!(item.product().extra.is_empty());
        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn test_subtotal() {
        let item = LineItem::new(&product()).with_quantity(NonZeroU32::new(3).unwrap());
        assert_eq!(item.subtotal(), Price::from_cents(2997));
    }
}

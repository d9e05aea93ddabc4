//! Catalog product records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Price, ProductId};

/// Customer rating summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating (e.g., 3.9).
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

/// A product as returned by the catalog.
///
/// Fields the storefront does not know about are kept in `extra` and written
/// back unchanged, so a product snapshot survives a persist/load cycle intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    /// Any additional fields on the catalog record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Create a product with only the required fields set.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            description: String::new(),
            category: String::new(),
            image: String::new(),
            rating: None,
            extra: Map::new(),
        }
    }
}

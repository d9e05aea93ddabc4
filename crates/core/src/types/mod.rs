//! Core types for Fakestore.
//!
//! This module provides type-safe wrappers for catalog concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::{EmptyProductId, ProductId};
pub use price::Price;
pub use product::{Product, Rating};

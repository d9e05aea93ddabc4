//! Fakestore Core - Shared types and the cart store.
//!
//! This crate is used by every Fakestore component:
//! - `storefront` - HTML storefront server
//! - `cli` - Command-line access to the catalog and cart
//!
//! # Architecture
//!
//! The core crate performs no I/O of its own. Persistence goes through the
//! [`cart::SlotStorage`] trait, so callers decide where the cart lives.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, and catalog product records
//! - [`cart`] - Line items, cart state, and the persisted cart store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use types::*;

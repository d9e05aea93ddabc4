//! Fakestore Storefront library.
//!
//! This crate provides the storefront functionality as a library, so the
//! server binary, the CLI and the integration tests share one implementation.
//!
//! # Modules
//!
//! - [`catalog`] - Product catalog API client with response caching
//! - [`storage`] - File-backed slot storage for the cart
//! - [`routes`] - HTML pages and cart form handlers
//! - [`state`] - Shared application state (config, catalog, cart store)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;

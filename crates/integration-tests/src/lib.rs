//! Integration test support for Fakestore.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fakestore-integration-tests
//! ```
//!
//! No network access is needed: [`FakeCatalog`] serves a small fixed product
//! list from an in-process axum server on an ephemeral port, answering the
//! same way the public catalog does (including an empty `200` body for
//! unknown ids).
//!
//! A few ids trigger failure modes:
//! - `limited` - `429 Too Many Requests` with `Retry-After: 7`
//! - `broken` - `500 Internal Server Error`
//! - `garbage` - `200` with a body that is not JSON

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use fakestore_storefront::config::StorefrontConfig;
use serde_json::{Value, json};

/// Products served by [`FakeCatalog`].
#[must_use]
pub fn fixture_products() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }),
        json!({
            "id": 9,
            "title": "WD 2TB Elements Portable External Hard Drive - USB 3.0",
            "price": 64,
            "description": "USB 3.0 and USB 2.0 compatibility.",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/61IBBVJvSDL._AC_SY879_.jpg",
            "rating": { "rate": 3.3, "count": 203 }
        }),
        json!({
            "id": 14,
            "title": "Samsung 49-Inch CHG90 Curved Gaming Monitor",
            "price": 999.99,
            "description": "49 inch super ultrawide 32:9 curved gaming monitor.",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/81Zt42ioCgL._AC_SX679_.jpg",
            "rating": { "rate": 2.2, "count": 140 }
        }),
    ]
}

/// A running in-process catalog server.
pub struct FakeCatalog {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl FakeCatalog {
    /// Start serving on `127.0.0.1` with an OS-assigned port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));

        let app = Router::new()
            .route("/products", get(list_products))
            .route("/products/{id}", get(get_product))
            .with_state(Arc::clone(&hits));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake catalog");
        let addr = listener.local_addr().expect("fake catalog address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake catalog server");
        });

        Self { addr, hits }
    }

    /// Base URL to use as `CATALOG_BASE_URL`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests served so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Storefront configuration pointing at this catalog.
    ///
    /// # Panics
    ///
    /// Panics if the generated configuration is invalid.
    #[must_use]
    pub fn config(&self, cache_ttl_secs: u64) -> StorefrontConfig {
        let base_url = self.base_url();
        let ttl = cache_ttl_secs.to_string();
        StorefrontConfig::from_lookup(|key| match key {
            "CATALOG_BASE_URL" => Some(base_url.clone()),
            "CATALOG_CACHE_TTL_SECS" => Some(ttl.clone()),
            _ => None,
        })
        .expect("test configuration")
    }
}

async fn list_products(State(hits): State<Arc<AtomicUsize>>) -> Json<Vec<Value>> {
    hits.fetch_add(1, Ordering::SeqCst);
    Json(fixture_products())
}

async fn get_product(State(hits): State<Arc<AtomicUsize>>, Path(id): Path<String>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);

    match id.as_str() {
        "limited" => (
            StatusCode::TOO_MANY_REQUESTS,
            [("retry-after", "7")],
            "slow down",
        )
            .into_response(),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        "garbage" => (StatusCode::OK, "<html>not json</html>").into_response(),
        _ => fixture_products()
            .into_iter()
            .find(|p| p["id"].to_string() == id)
            // The public catalog answers unknown ids with an empty 200.
            .map_or_else(|| StatusCode::OK.into_response(), |p| Json(p).into_response()),
    }
}

//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /                       - Product listing (?category= filter)
//! GET  /products/{id}          - Product detail
//!
//! # Cart (form posts redirect to /cart)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit of a product
//! POST /cart/update            - Set quantity (below 1 removes)
//! POST /cart/remove            - Remove item
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Total units (plain text)
//! ```

pub mod cart;
pub mod products;

use axum::{
    Router,
    extract::Request,
    middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
}

/// Build the application: routes, health check, and request middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

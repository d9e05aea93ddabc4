//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. `TraceLayer` (request span with an empty `request_id` field)
//! 3. Request ID (fills in `request_id`, echoes it to the client)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};

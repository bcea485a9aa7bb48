//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Health check
//!
//! # Menu
//! GET    /api/menu               - Menu listing (?category=, ?q=)
//! GET    /api/menu/featured      - Featured items (?limit=, default 3)
//! GET    /api/menu/{id}          - Menu item detail
//! GET    /api/categories         - Category filter options
//!
//! # Cart
//! GET    /api/cart               - Cart contents and totals
//! GET    /api/cart/count         - Cart badge count
//! POST   /api/cart/items         - Add one unit of an item
//! PUT    /api/cart/items/{id}    - Set quantity (<= 0 removes)
//! DELETE /api/cart/items/{id}    - Remove item
//! DELETE /api/cart               - Clear cart
//!
//! # Checkout
//! POST   /api/checkout           - Place a mock order
//! ```

pub mod cart;
pub mod checkout;
pub mod menu;

use axum::{
    Router,
    extract::Request,
    middleware::from_fn,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the menu routes router.
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::index))
        .route("/featured", get(menu::featured))
        .route("/{id}", get(menu::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/count", get(cart::count))
        .route("/items", post(cart::add))
        .route("/items/{id}", put(cart::update).delete(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/menu", menu_routes())
        .route("/api/categories", get(menu::categories))
        .nest("/api/cart", cart_routes())
        .route("/api/checkout", post(checkout::place_order))
}

/// The complete application: routes, request IDs, and request tracing.
///
/// Sentry layers are added by the binary so tests can drive this router
/// without a Sentry client.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

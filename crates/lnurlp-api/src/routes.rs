//! # Routes
//!
//! Axum router configuration for the LNURL-pay responder.

use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET /lnurlp/{username}              - LNURL-pay (phase 1, or phase 2 with `?amount=`)
/// - GET /.well-known/lnurlp/{username}  - same handler, Lightning Address path
/// - GET /health, GET /                  - health check
pub fn create_router(state: AppState) -> Router {
    // Wallets running in a browser fetch these cross-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let lnurlp_routes = Router::new().route("/{username}", get(handlers::lnurlp));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // LNURL-pay
        .nest("/lnurlp", lnurlp_routes.clone())
        .nest("/.well-known/lnurlp", lnurlp_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

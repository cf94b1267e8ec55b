//! Local callback HTTP API

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::state::AppState;

pub mod health;
pub mod labels;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        // Health API - public route
        .merge(health::router())
        // Label serving and manual reprint
        .merge(labels::router())
}

/// Fully configured application with middleware and state.
///
/// CORS is fully open: the agent serves the shop front-end on the local
/// network. Scope this down before exposing beyond localhost.
pub fn build_app(state: AppState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`        - Service description (public)
//! - `GET  /health`  - Health check: database (public)
//! - `/auth/*`       - Registration and token issuance (public)
//! - `/urls/*`       - Link management and redirects (mixed, see [`api::routes`])
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin, method and header
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, root_handler};
use crate::api::middleware::{cors, tracing as trace};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the routes and middleware without path normalization.
///
/// Tests drive this directly; paths must be given without a trailing slash.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/auth", api::routes::auth_routes())
        .nest("/urls", api::routes::url_routes())
        .with_state(state)
        .layer(trace::layer())
        .layer(cors::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so `/urls/` and `/urls` reach
/// the same handler.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

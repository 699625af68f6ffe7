//! Handler for the service landing endpoint.

use axum::Json;
use serde_json::{Value, json};

/// Returns a short description of the service.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Welcome to URL Shortener API",
        "version": env!("CARGO_PKG_VERSION"),
        "health": "/health",
    }))
}

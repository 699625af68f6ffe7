//! Cross-origin resource sharing.

use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS: any origin, method and header, without credentials.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

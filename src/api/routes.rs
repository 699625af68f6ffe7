//! API route configuration.
//!
//! Routes that act on behalf of a user authenticate through the
//! [`CurrentUser`](crate::api::middleware::auth::CurrentUser) extractor.

use crate::api::handlers::{
    delete_link_handler, my_links_handler, redirect_handler, register_handler, shorten_handler,
    stats_handler, token_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Account routes, mounted under `/auth`.
///
/// # Endpoints
///
/// - `POST /register` - Create an account
/// - `POST /token`    - Exchange credentials for a bearer token
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/token", post(token_handler))
}

/// Link routes, mounted under `/urls`.
///
/// # Endpoints
///
/// - `POST   /`              - Shorten a URL (auth)
/// - `GET    /my-urls`       - List own links (auth)
/// - `GET    /stats/{code}`  - Link record with click count (auth, owner)
/// - `GET    /{code}`        - Redirect to the target (public)
/// - `DELETE /{code}`        - Delete a link (auth, owner)
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(shorten_handler))
        .route("/my-urls", get(my_links_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/{code}", get(redirect_handler).delete(delete_link_handler))
}

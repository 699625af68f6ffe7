//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /urls/{code}`
///
/// The click counter is incremented in the same statement that resolves the
/// target, so concurrent hits are never lost. Inactive links behave as if
/// they did not exist.
///
/// # Response
///
/// `302 Found` with the target in the `Location` header.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or inactive.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let target = state.link_service.resolve_and_count(&code).await?;

    debug!(code = %code, target = %target, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]))
}

//! Handler for per-link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::link::LinkResponse;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the full record of a link, including its click count.
///
/// # Endpoint
///
/// `GET /urls/stats/{code}`
///
/// # Errors
///
/// - **401 Unauthorized**: Missing or invalid token
/// - **403 Forbidden**: The link belongs to someone else
/// - **404 Not Found**: Unknown code
pub async fn stats_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(code): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_stats(&code, &user).await?;

    Ok(Json(link.into()))
}

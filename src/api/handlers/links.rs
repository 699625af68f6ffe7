//! Handlers for the caller's own links.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde_json::json;

use crate::api::dto::link::{LinkResponse, MessageResponse};
use crate::api::dto::pagination::SkipLimitParams;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists links owned by the caller, oldest first.
///
/// # Endpoint
///
/// `GET /urls/my-urls/?skip=0&limit=100`
///
/// # Query Parameters
///
/// - `skip`: Records to skip (default: 0)
/// - `limit`: Maximum records to return (default: 100, max: 1000)
pub async fn my_links_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    params: Result<Query<SkipLimitParams>, QueryRejection>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let Query(params) = params?;
    let (skip, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({ "limit": params.limit })))?;

    let links = state.link_service.list_links(&user, skip, limit).await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Permanently deletes a link owned by the caller.
///
/// # Endpoint
///
/// `DELETE /urls/{code}`
///
/// # Errors
///
/// - **403 Forbidden**: The link belongs to someone else
/// - **404 Not Found**: Unknown code
pub async fn delete_link_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(code): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.link_service.delete_link(&code, &user).await?;

    Ok(Json(MessageResponse {
        message: "URL deleted successfully".to_string(),
    }))
}

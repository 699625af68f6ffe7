//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link owned by the caller.
///
/// # Endpoint
///
/// `POST /urls/`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created` with the stored link record; `clicks` starts at 0.
///
/// # Errors
///
/// - **400 Bad Request**: Malformed body or not an http(s) URL
/// - **401 Unauthorized**: Missing or invalid token
/// - **409 Conflict**: Lost a race on the generated code
/// - **503 Service Unavailable**: No free code found within the retry budget
pub async fn shorten_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .create_link(&payload.original_url, &user)
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

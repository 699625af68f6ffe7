//! Bearer token authentication extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::entities::User;
use crate::{error::AppError, state::AppState};

/// The authenticated caller of a request.
///
/// Handlers that require authentication take this extractor and pass the
/// inner [`User`] explicitly to services.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// Rejects with `401 Unauthorized` (and `WWW-Authenticate: Bearer`) if:
/// - Authorization header is missing or not a bearer token
/// - Token is invalid or expired
/// - The user no longer exists or is inactive
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthBearer(token) = AuthBearer::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                AppError::unauthorized(
                    "Not authenticated",
                    json!({"reason": "Authorization header is missing or invalid"}),
                )
            })?;

        let user = state.auth_service.authenticate(&token).await?;

        Ok(CurrentUser(user))
    }
}

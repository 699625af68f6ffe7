//! Handlers for account registration and token issuance.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /auth/register`
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com", "password": "correct horse" }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: Invalid email or password length
/// - **409 Conflict**: Email already registered
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = state
        .auth_service
        .register(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Exchanges credentials for a bearer access token.
///
/// # Endpoint
///
/// `POST /auth/token`
///
/// # Response
///
/// ```json
/// { "access_token": "eyJ...", "token_type": "bearer", "expires_in": 1800 }
/// ```
///
/// # Errors
///
/// Returns 401 Unauthorized for unknown emails, wrong passwords and
/// deactivated accounts alike.
pub async fn token_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(payload) = payload?;

    let token = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(token.into()))
}

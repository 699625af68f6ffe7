//! Account registration, login, and bearer token authentication.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::user::normalize_email;
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::security::JwtCodec;
use crate::infrastructure::security::password::{hash_password, verify_password};

/// A freshly issued access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Service for user accounts and JWT bearer authentication.
///
/// Passwords are stored as Argon2id hashes. Access tokens carry the user's
/// email as `sub`; each authenticated request reloads the user so
/// deactivation takes effect immediately.
pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    jwt: JwtCodec,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(user_repository: Arc<dyn UserRepository>, jwt: JwtCodec) -> Self {
        Self {
            user_repository,
            jwt,
        }
    }

    /// Registers a new active account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = normalize_email(email);
        let hashed_password = hash_password(password)?;

        let user = self
            .user_repository
            .create(NewUser {
                email: email.clone(),
                hashed_password,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => AppError::conflict(
                    "Email already registered",
                    json!({ "email": email }),
                ),
                other => other,
            })?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Exchanges credentials for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for unknown emails, wrong passwords,
    /// and inactive accounts, with the same message for all three.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AppError> {
        let email = normalize_email(email);

        let user = self.user_repository.find_by_email(&email).await?;

        let user = match user {
            Some(user) if user.is_active && password_matches(password, &user) => user,
            _ => {
                warn!("Failed login attempt");
                return Err(invalid_credentials());
            }
        };

        let access_token = self.jwt.issue(user.id, &user.email)?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.jwt.ttl_seconds(),
        })
    }

    /// Resolves a bearer token to the active user it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid or expired,
    /// or the user no longer exists or is inactive.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let claims = self.jwt.decode(token)?;

        match self.user_repository.find_by_email(&claims.sub).await? {
            Some(user) if user.is_active => Ok(user),
            Some(_) => Err(AppError::unauthorized(
                "Could not validate credentials",
                json!({ "reason": "Inactive user" }),
            )),
            None => Err(AppError::unauthorized(
                "Could not validate credentials",
                json!({ "reason": "Unknown user" }),
            )),
        }
    }
}

/// A stored hash that cannot be parsed counts as a mismatch.
fn password_matches(password: &str, user: &User) -> bool {
    verify_password(password, &user.hashed_password).unwrap_or_else(|e| {
        warn!(user_id = user.id, error = %e, "Stored password hash is unreadable");
        false
    })
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Incorrect email or password", json!({}))
}

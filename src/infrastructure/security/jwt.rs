//! JWT access token signing and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the user's email.
    pub sub: String,
    /// User ID at issuance time.
    pub uid: i64,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Longest accepted token lifetime: one year.
pub const MAX_TTL_MINUTES: i64 = 525_600;

/// Parses an HMAC algorithm name (`HS256`, `HS384`, `HS512`).
///
/// Only shared-secret algorithms are supported since tokens are signed with
/// `SECRET_KEY`.
pub fn parse_hmac_algorithm(name: &str) -> Option<Algorithm> {
    match name.trim().to_ascii_uppercase().as_str() {
        "HS256" => Some(Algorithm::HS256),
        "HS384" => Some(Algorithm::HS384),
        "HS512" => Some(Algorithm::HS512),
        _ => None,
    }
}

/// Signs and verifies access tokens with a shared secret.
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtCodec {
    /// Creates a codec signing with `secret` and issuing tokens valid for
    /// `ttl_minutes`, capped at [`MAX_TTL_MINUTES`].
    pub fn new(secret: &str, algorithm: Algorithm, ttl_minutes: i64) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            validation,
            ttl: Duration::try_minutes(ttl_minutes.min(MAX_TTL_MINUTES))
                .unwrap_or_else(Duration::zero),
        }
    }

    /// Lifetime of issued tokens in seconds.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Issues a signed access token for the given user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            uid: user_id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign access token");
            AppError::internal("Failed to issue token", json!({}))
        })
    }

    /// Verifies signature and expiry, returning the embedded claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for expired, malformed, or forged tokens.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::ExpiredSignature => "Token has expired",
                ErrorKind::InvalidSignature => "Invalid token signature",
                _ => "Invalid token",
            };
            AppError::unauthorized(
                "Could not validate credentials",
                json!({ "reason": reason }),
            )
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> JwtCodec {
        JwtCodec::new("test-secret", Algorithm::HS256, 30)
    }

    #[test]
    fn test_issue_and_decode() {
        let codec = codec();
        let token = codec.issue(42, "alice@example.com").unwrap();

        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.uid, 42);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_decode_rejects_other_secret() {
        let token = codec().issue(1, "a@example.com").unwrap();
        let other = JwtCodec::new("another-secret", Algorithm::HS256, 30);

        let err = other.decode(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_decode_rejects_expired() {
        let expired = JwtCodec::new("test-secret", Algorithm::HS256, -10);
        let token = expired.issue(1, "a@example.com").unwrap();

        let err = codec().decode(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(codec().decode("not.a.token").is_err());
    }

    #[test]
    fn test_decode_rejects_algorithm_mismatch() {
        let hs512 = JwtCodec::new("test-secret", Algorithm::HS512, 30);
        let token = hs512.issue(1, "a@example.com").unwrap();

        assert!(codec().decode(&token).is_err());
    }

    #[test]
    fn test_huge_ttl_is_capped() {
        let codec = JwtCodec::new("test-secret", Algorithm::HS256, i64::MAX);
        assert_eq!(codec.ttl_seconds(), MAX_TTL_MINUTES * 60);

        let token = codec.issue(1, "a@example.com").unwrap();
        assert!(codec.decode(&token).is_ok());
    }

    #[test]
    fn test_parse_hmac_algorithm() {
        assert_eq!(parse_hmac_algorithm("HS256"), Some(Algorithm::HS256));
        assert_eq!(parse_hmac_algorithm("hs384"), Some(Algorithm::HS384));
        assert_eq!(parse_hmac_algorithm(" HS512 "), Some(Algorithm::HS512));
        assert_eq!(parse_hmac_algorithm("RS256"), None);
        assert_eq!(parse_hmac_algorithm(""), None);
    }
}

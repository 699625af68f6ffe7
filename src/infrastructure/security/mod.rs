//! Credential primitives: password hashing and access token signing.
//!
//! - [`password`] - Argon2id hashing and verification
//! - [`jwt`] - HMAC-signed JWT access tokens

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtCodec};

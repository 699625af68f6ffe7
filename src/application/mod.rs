//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation, and ownership rules, and
//! give HTTP handlers a small API that takes the caller's identity explicitly.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, redirect, stats, listing, deletion
//! - [`services::auth_service::AuthService`] - Registration, login, bearer token authentication

pub mod services;

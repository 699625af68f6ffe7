//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters for every value.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, click counting, ownership queries
//! - [`PgUserRepository`] - User accounts

pub mod pg_link_repository;
pub mod pg_user_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;

//! Core domain entities.
//!
//! Entities are plain data structures without persistence concerns. Creation
//! inputs live in separate `New*` structs.
//!
//! - [`Link`] - A shortened URL owned by a user
//! - [`User`] - An account that owns links

pub mod link;
pub mod user;

pub use link::{Link, NewLink};
pub use user::{NewUser, User};

//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Random short code generation
//! - [`target_url`] - Validation of URLs submitted for shortening

pub mod code_generator;
pub mod target_url;

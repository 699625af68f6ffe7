//! Link entity representing a shortened URL owned by a user.

use chrono::{DateTime, Utc};

/// A shortened URL with its owner and click counter.
///
/// The `short_url` code is globally unique and never changes once assigned.
/// `clicks` only grows, one step per successful redirect.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
    pub user_id: i64,
    pub is_active: bool,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_url: String,
        created_at: DateTime<Utc>,
        clicks: i64,
        user_id: i64,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            original_url,
            short_url,
            created_at,
            clicks,
            user_id,
            is_active,
        }
    }

    /// Returns true if `user_id` owns this link.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Input data for creating a new link.
///
/// Click count starts at zero and the link starts active; both are set by the
/// database defaults.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub original_url: String,
    pub short_url: String,
    pub user_id: i64,
}

//! User model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the users registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PersistedUserRecord {
    pub user_id: i64,
    pub username: Option<String>,
    pub full_name: String,
    pub city: String,
    pub registered_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl PersistedUserRecord {
    /// Build a record for a registration completed right now
    pub fn new(user_id: i64, username: Option<String>, full_name: String, city: String) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            username,
            full_name,
            city,
            registered_at: now,
            last_activity_at: now,
        }
    }
}

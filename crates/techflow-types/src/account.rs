//! Administrator credential entity

use chrono::{DateTime, Utc};

/// The administrative account able to manage the catalog.
///
/// `password_hash` is an argon2 PHC string. The record never crosses the
/// HTTP boundary; responses only ever carry the username.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

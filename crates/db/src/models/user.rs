//! User accounts.

use mytasks_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `users` table.
///
/// Not `Serialize`: the password hash must never reach a response body.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub picture_url: Option<String>,
    pub created_at: Timestamp,
}

/// Insert payload for a new user. `password_hash` is a PHC string.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub picture_url: Option<String>,
}

//! Session entity model and DTOs.

use sqlx::FromRow;

use mural_core::types::{Id, Timestamp};

/// A login session row. The opaque `token` is what clients present back in
/// the `session_id` cookie.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: Id,
    pub token: String,
    pub user_id: Id,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a session. Token generation lives in the API layer.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: Id,
    pub token: String,
    pub expires_at: Timestamp,
}

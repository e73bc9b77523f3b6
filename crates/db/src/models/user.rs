//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use mural_core::types::{Id, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- never serialize this to API responses
/// directly. Use [`UserPublic`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub tabcoins: i64,
    pub tabcash: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn into_public(self) -> UserPublic {
        UserPublic {
            id: self.id,
            username: self.username,
            tabcoins: self.tabcoins,
            tabcash: self.tabcash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Safe user representation for API responses (no hash, no email).
#[derive(Debug, Clone, Serialize)]
pub struct UserPublic {
    pub id: Id,
    pub username: String,
    pub tabcoins: i64,
    pub tabcash: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

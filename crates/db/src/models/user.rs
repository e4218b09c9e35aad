//! User entity model and DTOs.

use biogas_core::credentials::{Identity, StoredIdentity};
use biogas_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new user. The password must already be hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
}

impl From<User> for StoredIdentity {
    fn from(user: User) -> Self {
        StoredIdentity {
            id: user.id,
            email: user.email,
            password_hash: user.password_hash,
        }
    }
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Identity {
            id: user.id,
            email: user.email,
        }
    }
}

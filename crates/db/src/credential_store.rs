//! Postgres-backed [`CredentialStore`].

use async_trait::async_trait;
use biogas_core::credentials::{CredentialStore, Identity, StoreError, StoredIdentity};

use crate::models::user::CreateUser;
use crate::repositories::UserRepo;
use crate::DbPool;

/// Unique constraint guarding `users.email`.
const EMAIL_CONSTRAINT: &str = "uq_users_email";

/// PostgreSQL unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Credential store over an explicitly constructed connection pool.
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: DbPool,
}

impl PgCredentialStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn insert(&self, email: &str, password_hash: &str) -> Result<Identity, StoreError> {
        let input = CreateUser {
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        UserRepo::create(&self.pool, &input)
            .await
            .map(Identity::from)
            .map_err(|e| classify_insert_error(e, email))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StoredIdentity>, StoreError> {
        UserRepo::find_by_email(&self.pool, email)
            .await
            .map(|row| row.map(StoredIdentity::from))
            .map_err(unavailable)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(unavailable)
    }
}

/// Map an insert failure: a unique violation on the email constraint is a
/// duplicate, anything else means the store is unusable.
fn classify_insert_error(err: sqlx::Error, email: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
            && db_err.constraint() == Some(EMAIL_CONSTRAINT)
        {
            return StoreError::Duplicate(email.to_string());
        }
    }
    unavailable(err)
}

fn unavailable(err: sqlx::Error) -> StoreError {
    tracing::error!(error = %err, "Credential store query failed");
    StoreError::Unavailable(err.to_string())
}

//! Identity records and the credential store seam.
//!
//! [`CredentialStore`] is the only shared mutable resource behind
//! authentication. Implementations must enforce email uniqueness atomically;
//! callers do not pre-check. The Postgres implementation lives in the `db`
//! crate; [`InMemoryCredentialStore`] backs tests and database-less runs.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::types::DbId;

/// Public identity fields. Safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: DbId,
    pub email: String,
}

/// Full identity record as held by the store.
///
/// Contains the password hash -- NEVER serialize this. Use [`Identity`] for
/// external-facing output.
#[derive(Debug, Clone)]
pub struct StoredIdentity {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
}

impl StoredIdentity {
    pub fn to_identity(&self) -> Identity {
        Identity {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// Errors a credential store can report.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store's uniqueness guarantee on `email` rejected the insert.
    #[error("email {0} is already registered")]
    Duplicate(String),

    /// The store could not be reached or failed mid-operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(email) => CoreError::DuplicateIdentity { email },
            StoreError::Unavailable(msg) => CoreError::StorageUnavailable(msg),
        }
    }
}

/// Persistence for identity records.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new identity. Fails with [`StoreError::Duplicate`] if the
    /// email is already present; the existing record is left untouched.
    async fn insert(&self, email: &str, password_hash: &str) -> Result<Identity, StoreError>;

    /// Exact-match lookup by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredIdentity>, StoreError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Process-local credential store keyed by email.
///
/// Uniqueness is enforced under a single write lock, which gives the same
/// atomicity a database unique constraint does.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<Records>,
}

#[derive(Debug, Default)]
struct Records {
    next_id: DbId,
    by_email: HashMap<String, StoredIdentity>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored identities.
    pub async fn len(&self) -> usize {
        self.inner.read().await.by_email.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn insert(&self, email: &str, password_hash: &str) -> Result<Identity, StoreError> {
        let mut records = self.inner.write().await;
        if records.by_email.contains_key(email) {
            return Err(StoreError::Duplicate(email.to_string()));
        }

        records.next_id += 1;
        let stored = StoredIdentity {
            id: records.next_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        let identity = stored.to_identity();
        records.by_email.insert(email.to_string(), stored);

        tracing::debug!(user_id = identity.id, "Identity stored in memory");
        Ok(identity)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StoredIdentity>, StoreError> {
        Ok(self.inner.read().await.by_email.get(email).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

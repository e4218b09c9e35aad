//! Registration and login over an explicitly constructed credential store.

use std::sync::Arc;

use biogas_core::credentials::{CredentialStore, Identity};
use biogas_core::error::CoreError;

use crate::auth::password::{validate_password_strength, PasswordHashConfig, PasswordHashing};

/// Verified against when a login names an unknown email, so that path costs
/// one Argon2 verification just like a wrong password does.
const DUMMY_PASSWORD: &str = "biogas-monitor-dummy-password";

/// Issues identity records and authenticates logins.
///
/// Holds no session state. Every operation is one store round-trip plus one
/// Argon2 computation on the blocking pool.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hashing: PasswordHashing,
    min_password_length: usize,
    dummy_hash: Arc<str>,
}

impl AuthService {
    /// Build the service around a store handle.
    ///
    /// Computes one hash up front for the unknown-email path, so construction
    /// costs a single Argon2 run.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        config: &PasswordHashConfig,
    ) -> Result<Self, CoreError> {
        let hashing = PasswordHashing::new(config)
            .map_err(|e| CoreError::Internal(format!("Invalid Argon2 parameters: {e}")))?;
        let dummy_hash = hashing
            .hash_password(DUMMY_PASSWORD)
            .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))?;

        Ok(Self {
            store,
            hashing,
            min_password_length: config.min_length,
            dummy_hash: dummy_hash.into(),
        })
    }

    /// Create a new identity record.
    ///
    /// Uniqueness of `email` is left to the store; a clash comes back as
    /// [`CoreError::DuplicateIdentity`].
    pub async fn register(&self, email: &str, password: &str) -> Result<Identity, CoreError> {
        if email.trim().is_empty() {
            return Err(CoreError::Validation("Email must not be empty".into()));
        }
        validate_password_strength(password, self.min_password_length)
            .map_err(CoreError::Validation)?;

        let password_hash = self.hash_blocking(password).await?;
        let identity = self.store.insert(email, &password_hash).await.map_err(|e| {
            tracing::warn!(error = %e, "Registration rejected by credential store");
            CoreError::from(e)
        })?;

        tracing::info!(user_id = identity.id, "Identity registered");
        Ok(identity)
    }

    /// Authenticate an email/password pair.
    ///
    /// An unknown email and a wrong password both yield
    /// [`CoreError::InvalidCredentials`].
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, CoreError> {
        let record = self.store.find_by_email(email).await?;

        let (hash, identity) = match &record {
            Some(stored) => (stored.password_hash.clone(), Some(stored.to_identity())),
            None => (self.dummy_hash.to_string(), None),
        };

        // A corrupt stored hash must fail the same way an unknown email does.
        let matches = match self.verify_blocking(password, hash).await? {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!(
                    user_id = identity.as_ref().map(|i| i.id),
                    error = %e,
                    "Stored password hash could not be verified"
                );
                false
            }
        };

        match identity {
            Some(identity) if matches => {
                tracing::info!(user_id = identity.id, "Login succeeded");
                Ok(identity)
            }
            _ => {
                tracing::info!("Login rejected");
                Err(CoreError::InvalidCredentials)
            }
        }
    }

    /// Reachability of the backing store.
    pub async fn store_healthy(&self) -> bool {
        self.store.ping().await.is_ok()
    }

    async fn hash_blocking(&self, password: &str) -> Result<String, CoreError> {
        let hashing = self.hashing.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hashing.hash_password(&password))
            .await
            .map_err(|e| CoreError::Internal(format!("Hashing task failed: {e}")))?
            .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))
    }

    /// Runs the comparison on the blocking pool. The outer error is a task
    /// failure; the inner one is a hash that could not be parsed or checked.
    async fn verify_blocking(
        &self,
        password: &str,
        hash: String,
    ) -> Result<Result<bool, argon2::password_hash::Error>, CoreError> {
        let hashing = self.hashing.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hashing.verify_password(&password, &hash))
            .await
            .map_err(|e| CoreError::Internal(format!("Verification task failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use biogas_core::credentials::{InMemoryCredentialStore, StoreError, StoredIdentity};

    use super::*;

    fn fast_config() -> PasswordHashConfig {
        PasswordHashConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
            min_length: 1,
        }
    }

    fn service_with(store: Arc<dyn CredentialStore>) -> AuthService {
        AuthService::new(store, &fast_config()).expect("service should build")
    }

    /// Store that is never reachable.
    struct DownStore;

    #[async_trait]
    impl CredentialStore for DownStore {
        async fn insert(&self, _: &str, _: &str) -> Result<Identity, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn find_by_email(&self, _: &str) -> Result<Option<StoredIdentity>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn register_then_login_round_trip() {
        let service = service_with(Arc::new(InMemoryCredentialStore::new()));

        let created = service.register("op@plant.test", "s3cret").await.unwrap();
        assert_eq!(created.email, "op@plant.test");

        let logged_in = service.login("op@plant.test", "s3cret").await.unwrap();
        assert_eq!(logged_in, created);
    }

    #[tokio::test]
    async fn stored_hash_is_not_plaintext() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let service = service_with(store.clone());
        service.register("op@plant.test", "s3cret").await.unwrap();

        let stored = store.find_by_email("op@plant.test").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "s3cret");
        assert!(stored.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let service = service_with(Arc::new(InMemoryCredentialStore::new()));
        service.register("op@plant.test", "s3cret").await.unwrap();

        let result = service.login("op@plant.test", "guess").await;
        assert_matches!(result, Err(CoreError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_email_is_the_same_failure() {
        let service = service_with(Arc::new(InMemoryCredentialStore::new()));

        let result = service.login("ghost@plant.test", "whatever").await;
        assert_matches!(result, Err(CoreError::InvalidCredentials));
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_invalid_credentials() {
        let store = Arc::new(InMemoryCredentialStore::new());
        store
            .insert("known@plant.test", "not-a-phc-string")
            .await
            .unwrap();
        let service = service_with(store);

        let known = service.login("known@plant.test", "s3cret").await;
        let unknown = service.login("ghost@plant.test", "s3cret").await;

        assert_matches!(known, Err(CoreError::InvalidCredentials));
        assert_matches!(unknown, Err(CoreError::InvalidCredentials));
    }

    #[tokio::test]
    async fn duplicate_registration_keeps_first_record() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let service = service_with(store.clone());

        let first = service.register("dup@plant.test", "first-pass").await.unwrap();
        let second = service.register("dup@plant.test", "second-pass").await;
        assert_matches!(second, Err(CoreError::DuplicateIdentity { email }) if email == "dup@plant.test");

        assert_eq!(store.len().await, 1);
        let again = service.login("dup@plant.test", "first-pass").await.unwrap();
        assert_eq!(again, first);
        assert_matches!(
            service.login("dup@plant.test", "second-pass").await,
            Err(CoreError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn empty_password_rejected() {
        let service = service_with(Arc::new(InMemoryCredentialStore::new()));
        let result = service.register("op@plant.test", "").await;
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn blank_email_rejected() {
        let service = service_with(Arc::new(InMemoryCredentialStore::new()));
        let result = service.register("   ", "s3cret").await;
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn unreachable_store_reports_storage_unavailable() {
        let service = service_with(Arc::new(DownStore));

        assert_matches!(
            service.register("op@plant.test", "s3cret").await,
            Err(CoreError::StorageUnavailable(_))
        );
        assert_matches!(
            service.login("op@plant.test", "s3cret").await,
            Err(CoreError::StorageUnavailable(_))
        );
        assert!(!service.store_healthy().await);
    }

    #[tokio::test]
    async fn concurrent_duplicate_registrations_admit_one() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let service = service_with(store.clone());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service.register("race@plant.test", &format!("pass-{i}")).await
                })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(err) => assert_matches!(err, CoreError::DuplicateIdentity { .. }),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.len().await, 1);
    }
}

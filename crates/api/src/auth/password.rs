//! Argon2id password hashing, verification, and strength validation.
//!
//! All password hashes use the Argon2id variant with a cryptographically random
//! salt generated via [`OsRng`]. The PHC string format is used for storage so
//! that algorithm parameters and salt are embedded in the hash itself; hashes
//! created under an older work factor keep verifying after the factor changes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

/// Argon2 work factor, loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHashConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes over memory.
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
    /// Shortest password accepted at registration.
    pub min_length: usize,
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
            min_length: 1,
        }
    }
}

impl PasswordHashConfig {
    /// Load the work factor from environment variables.
    ///
    /// | Env Var               | Default |
    /// |-----------------------|---------|
    /// | `ARGON2_MEMORY_KIB`   | `19456` |
    /// | `ARGON2_ITERATIONS`   | `2`     |
    /// | `ARGON2_PARALLELISM`  | `1`     |
    /// | `PASSWORD_MIN_LENGTH` | `1`     |
    ///
    /// # Panics
    ///
    /// Panics if a variable is set but not a valid number.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let memory_kib: u32 = std::env::var("ARGON2_MEMORY_KIB")
            .unwrap_or_else(|_| defaults.memory_kib.to_string())
            .parse()
            .expect("ARGON2_MEMORY_KIB must be a valid u32");

        let iterations: u32 = std::env::var("ARGON2_ITERATIONS")
            .unwrap_or_else(|_| defaults.iterations.to_string())
            .parse()
            .expect("ARGON2_ITERATIONS must be a valid u32");

        let parallelism: u32 = std::env::var("ARGON2_PARALLELISM")
            .unwrap_or_else(|_| defaults.parallelism.to_string())
            .parse()
            .expect("ARGON2_PARALLELISM must be a valid u32");

        let min_length: usize = std::env::var("PASSWORD_MIN_LENGTH")
            .unwrap_or_else(|_| defaults.min_length.to_string())
            .parse()
            .expect("PASSWORD_MIN_LENGTH must be a valid usize");

        Self {
            memory_kib,
            iterations,
            parallelism,
            min_length: min_length.max(1),
        }
    }
}

/// Argon2id hasher bound to one work factor.
#[derive(Clone)]
pub struct PasswordHashing {
    argon2: Argon2<'static>,
}

impl PasswordHashing {
    /// Build a hasher. Fails if the configured parameters are out of the
    /// ranges Argon2 accepts (e.g. memory below `8 * parallelism` KiB).
    pub fn new(config: &PasswordHashConfig) -> Result<Self, argon2::Error> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password with a random salt.
    ///
    /// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
    pub fn hash_password(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
    pub fn verify_password(
        &self,
        password: &str,
        hash: &str,
    ) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;
        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Validate that a password meets minimum strength requirements.
///
/// Currently enforces a minimum character length. Returns `Ok(())` when the
/// password is acceptable, or `Err` with a human-readable explanation.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password must not be empty".to_string());
    }
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}

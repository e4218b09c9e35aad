//! Credential authentication.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`service`] -- [`AuthService`], registration and login over a credential store.

pub mod password;
pub mod service;

pub use service::AuthService;

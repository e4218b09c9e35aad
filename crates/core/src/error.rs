#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Registration attempted with an email that already has an identity.
    #[error("An account with email {email} already exists")]
    DuplicateIdentity { email: String },

    /// The backing credential store could not be reached.
    #[error("Credential storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Login failed. Deliberately does not say whether the email exists.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

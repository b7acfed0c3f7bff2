//! Authentication error types.

use thiserror::Error;

use crate::appwrite::AppwriteError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] gully_bazaar_core::EmailError),

    /// Invalid phone format.
    #[error("invalid phone: {0}")]
    InvalidPhone(#[from] gully_bazaar_core::PhoneError),

    /// Invalid credentials (wrong password or unknown account).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Account already exists for this email.
    #[error("account already exists")]
    AccountAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Account authenticated but does not carry the admin label.
    #[error("account is not an admin")]
    NotAdmin,

    /// A coordinate pair with only one component present.
    #[error("latitude and longitude must be provided together")]
    PartialCoordinates,

    /// A stored record violated the collection schema.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Backend error.
    #[error("backend error: {0}")]
    Backend(AppwriteError),
}

impl From<AppwriteError> for AuthError {
    /// Fold backend rejections into the auth-level vocabulary where the
    /// backend names the cause; everything else stays a backend error.
    fn from(err: AppwriteError) -> Self {
        match err.kind() {
            Some("user_already_exists") => Self::AccountAlreadyExists,
            Some("user_invalid_credentials" | "user_not_found") => Self::InvalidCredentials,
            _ => Self::Backend(err),
        }
    }
}

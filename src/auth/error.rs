//! Credential service error types.

use thiserror::Error;

use crate::auth::user_store::StoreError;

/// Errors that can occur during signup, signin or token issuance.
#[derive(Debug, Error)]
pub enum AuthError {
    /// An account with this email is already registered.
    #[error("account already exists")]
    AlreadyExists,

    /// Unknown email or wrong password. The two cases are deliberately not
    /// distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Storage, hashing or signing backend failure.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => Self::AlreadyExists,
            StoreError::Backend(source) => Self::Internal(source),
        }
    }
}

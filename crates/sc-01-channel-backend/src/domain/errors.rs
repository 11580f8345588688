//! # Backend Errors
//!
//! Error types for signing and verification.

use shared_crypto::CryptoError;
use thiserror::Error;

/// Errors that can occur while signing or verifying channel state.
///
/// A signature by the wrong signer is not an error: `verify` returns
/// `Ok(false)` for it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// Arguments do not describe the same channel.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The signature cannot be interpreted.
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    /// The account failed to sign.
    #[error("Account error: {0}")]
    Account(CryptoError),
}

impl From<CryptoError> for BackendError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::MalformedSignature(msg) => Self::MalformedSignature(msg),
            other => Self::Account(other),
        }
    }
}

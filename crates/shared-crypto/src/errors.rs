//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Secret key bytes do not form a valid secp256k1 scalar.
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Signature cannot be parsed as `r || s || v`.
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    /// The signing backend refused to sign.
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

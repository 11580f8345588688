//! # Account Capabilities
//!
//! Ports through which the channel backend signs and verifies. Key custody
//! lives behind [`Account`]; the workspace ships [`Secp256k1Account`] as the
//! in-process implementation.
//!
//! [`Secp256k1Account`]: crate::ecdsa::Secp256k1Account

use crate::CryptoError;
use shared_types::{Address, Signature};

/// A signing identity.
pub trait Account: Send + Sync {
    /// Address identifying this account.
    fn address(&self) -> Address;

    /// Sign arbitrary data.
    fn sign_data(&self, data: &[u8]) -> Result<Signature, CryptoError>;
}

/// Checks signatures produced by an [`Account`].
pub trait SignatureVerifier: Send + Sync {
    /// Whether `signature` over `data` was produced by `address`.
    ///
    /// A well-formed signature by someone else is `Ok(false)`; `Err` means the
    /// signature could not be interpreted at all.
    fn verify_signature(
        &self,
        data: &[u8],
        signature: &Signature,
        address: &Address,
    ) -> Result<bool, CryptoError>;
}

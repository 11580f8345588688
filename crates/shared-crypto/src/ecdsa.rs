//! # ECDSA Signatures (secp256k1)
//!
//! Ethereum-compatible accounts and signature verification.
//!
//! ## Format
//!
//! - Signatures are 65 bytes, `r || s || v` with `v ∈ {27, 28}`.
//!   Verification also accepts `v ∈ {0, 1}`.
//! - The signed digest is [`prefixed_hash`] of the data.
//! - The address is the last 20 bytes of the Keccak-256 of the uncompressed
//!   public key without its `0x04` tag.
//!
//! Signing is RFC 6979 deterministic and low-S normalized (EIP-2).

use crate::account::{Account, SignatureVerifier};
use crate::hashing::{keccak256, prefixed_hash};
use crate::CryptoError;
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};
use shared_types::{Address, Hash, Signature};
use tracing::trace;
use zeroize::Zeroize;

/// Length of an `r || s || v` signature.
pub const SIGNATURE_LEN: usize = 65;

/// Derive the Ethereum address of a public key.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    // Skip the 0x04 tag.
    let hash = keccak256(&encoded.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Address::new(address)
}

/// Recover the signer of a 32-byte digest.
///
/// Returns `Ok(None)` for a well-formed signature from which no key can be
/// recovered.
pub fn recover_address(digest: &Hash, signature: &[u8]) -> Result<Option<Address>, CryptoError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(CryptoError::MalformedSignature(format!(
            "expected {SIGNATURE_LEN} bytes, got {}",
            signature.len()
        )));
    }

    let recovery_id = parse_recovery_id(signature[64])?;

    let mut rs = [0u8; 64];
    rs.copy_from_slice(&signature[..64]);
    let parsed = EcdsaSignature::from_slice(&rs);
    rs.zeroize();
    let sig = parsed.map_err(|_| CryptoError::MalformedSignature("r or s out of range".into()))?;

    match VerifyingKey::recover_from_prehash(digest, &sig, recovery_id) {
        Ok(key) => Ok(Some(address_from_pubkey(&key))),
        Err(_) => Ok(None),
    }
}

fn parse_recovery_id(v: u8) -> Result<RecoveryId, CryptoError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => {
            return Err(CryptoError::MalformedSignature(format!(
                "invalid recovery id {v}"
            )))
        }
    };
    RecoveryId::try_from(id)
        .map_err(|_| CryptoError::MalformedSignature(format!("invalid recovery id {v}")))
}

// =============================================================================
// ACCOUNT
// =============================================================================

/// In-process secp256k1 account.
pub struct Secp256k1Account {
    signing_key: SigningKey,
    address: Address,
}

impl Secp256k1Account {
    /// Generate a random account.
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::random(&mut rand::thread_rng()))
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let mut bytes = bytes;
        let key = SigningKey::from_bytes((&bytes).into());
        bytes.zeroize();
        key.map(Self::from_signing_key)
            .map_err(|_| CryptoError::InvalidPrivateKey)
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = address_from_pubkey(signing_key.verifying_key());
        Self {
            signing_key,
            address,
        }
    }

    /// Sign a precomputed 32-byte digest.
    pub fn sign_digest(&self, digest: &Hash) -> Result<Signature, CryptoError> {
        let (sig, recid) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        let mut bytes = Vec::with_capacity(SIGNATURE_LEN);
        bytes.extend_from_slice(&sig.to_bytes());
        bytes.push(recid.to_byte() + 27);
        Ok(Signature(bytes))
    }
}

impl Account for Secp256k1Account {
    fn address(&self) -> Address {
        self.address
    }

    fn sign_data(&self, data: &[u8]) -> Result<Signature, CryptoError> {
        trace!(signer = %self.address, len = data.len(), "signing data");
        self.sign_digest(&prefixed_hash(data))
    }
}

impl std::fmt::Debug for Secp256k1Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1Account")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// VERIFIER
// =============================================================================

/// Verifies signatures made by Ethereum accounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct EthereumVerifier;

impl SignatureVerifier for EthereumVerifier {
    fn verify_signature(
        &self,
        data: &[u8],
        signature: &Signature,
        address: &Address,
    ) -> Result<bool, CryptoError> {
        let recovered = recover_address(&prefixed_hash(data), signature.as_bytes())?;
        Ok(recovered.as_ref() == Some(address))
    }
}

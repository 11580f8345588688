//! # Keccak-256 Hashing
//!
//! Ethereum's pre-standard SHA-3. Channel IDs and signed-message digests are
//! both Keccak-256.

use sha3::{Digest, Keccak256};
use shared_types::Hash;

/// Prefix of an Ethereum "personal" signed message over a 32-byte payload.
pub const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Keccak-256 of `data`.
pub fn keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}

/// Digest that accounts sign for `data`:
/// `keccak256(prefix || keccak256(data))`.
pub fn prefixed_hash(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(SIGNED_MESSAGE_PREFIX);
    hasher.update(keccak256(data));
    hasher.finalize().into()
}

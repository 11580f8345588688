//! # Shared Crypto - Channel Signing Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Channel IDs, signed-message digests |
//! | `ecdsa` | secp256k1 | Ethereum-compatible accounts and verification |
//! | `account` | - | `Account` / `SignatureVerifier` ports |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization (EIP-2)
//! - **Secret keys**: intermediate key buffers are zeroized

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod account;
pub mod ecdsa;
pub mod errors;
pub mod hashing;

// Re-exports
pub use account::{Account, SignatureVerifier};
pub use ecdsa::{address_from_pubkey, recover_address, EthereumVerifier, Secp256k1Account};
pub use errors::CryptoError;
pub use hashing::{keccak256, prefixed_hash};

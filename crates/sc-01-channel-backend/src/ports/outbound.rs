//! # Outbound Ports (Driven Ports)
//!
//! Key custody and signature checking are external capabilities. Their
//! traits live in `shared-crypto` so that every crate signs the same way.

pub use shared_crypto::{Account, SignatureVerifier};

//! # Channel Backend Subsystem (SC-01)
//!
//! Canonical encoding of channel values, channel identity and state
//! signing.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): ABI encoding, no I/O
//! - **Ports Layer** (`ports/`): `ChannelBackend` API; `Account` and
//!   `SignatureVerifier` capabilities
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Compatibility
//!
//! Encodings, channel IDs and signatures are bit-exact with the Ethereum
//! adjudicator contract. Changing a layout breaks every deployed channel.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::codec::{
    channel_id, encode_allocation, encode_params, encode_state, encode_sub_alloc,
};
pub use domain::errors::BackendError;
pub use ports::inbound::ChannelBackend;
pub use ports::outbound::{Account, SignatureVerifier};
pub use service::EthereumBackend;

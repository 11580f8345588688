//! # State-Channel Test Suite
//!
//! Cross-crate flows: proposals delivered by the peer dispatcher, states
//! signed and verified by the channel backend, channels funded on a shared
//! ledger.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Wire messages, accounts, proposals
//! └── integration/      # Cross-crate flows
//!     ├── funding_flow.rs
//!     ├── state_signing.rs
//!     └── peer_lifecycle.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sc-tests
//! cargo test -p sc-tests integration::funding_flow::
//! ```

pub mod fixtures;
pub mod integration;

//! # Channel Funding Subsystem (SC-02)
//!
//! Deposits each participant's share of a channel allocation into the
//! external ledger.
//!
//! ## Guarantees
//!
//! | Property | How |
//! |----------|-----|
//! | Idempotence | Query before deposit; only the missing remainder is deposited |
//! | Cancelability | Every ledger call is raced against the caller's `Context` |
//! | No coordination | Participants fund independently; the ledger is the only shared resource |
//!
//! ## Module Structure
//!
//! ```text
//! sc-02-funding/
//! ├── domain/          # FundingError, LedgerError, Stage
//! ├── ports/           # ChannelFunder, LedgerClient
//! ├── adapters/        # InMemoryLedger
//! ├── config.rs        # FunderConfig
//! └── service.rs       # Funder
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::InMemoryLedger;
pub use config::FunderConfig;
pub use domain::{FundingError, LedgerError, Stage};
pub use ports::{ChannelFunder, DepositReceipt, LedgerClient};
pub use service::Funder;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

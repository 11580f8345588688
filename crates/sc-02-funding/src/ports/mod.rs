//! # Ports Layer
//!
//! Inbound API of the funder and the ledger it deposits into.

pub mod inbound;
pub mod outbound;

pub use inbound::ChannelFunder;
pub use outbound::{DepositReceipt, LedgerClient};

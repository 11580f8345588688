//! # Adapters Layer
//!
//! Ledger implementations.

pub mod memory_ledger;

pub use memory_ledger::InMemoryLedger;

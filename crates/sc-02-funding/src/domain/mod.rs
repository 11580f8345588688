//! # Domain Layer
//!
//! Funding errors and their classification.

pub mod errors;

pub use errors::{FundingError, LedgerError, Stage};

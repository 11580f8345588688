//! # Error Types
//!
//! Errors fall into two disjoint families:
//!
//! - **Environment errors** (closed connections, ledger failures, timeouts)
//!   are recoverable and returned to the caller.
//! - **Invariant violations** (duplicate subscriptions, malformed funding
//!   requests) are caller bugs. They are never returned; they abort through
//!   [`invariant_violation!`](crate::invariant_violation) after being logged.

use thiserror::Error;

/// Abort on a violated internal invariant.
///
/// Logs the message at `error` level under the `invariant` target, then
/// panics with the same message.
#[macro_export]
macro_rules! invariant_violation {
    ($($arg:tt)+) => {{
        $crate::__tracing::error!(target: "invariant", $($arg)+);
        panic!($($arg)+)
    }};
}

/// Structural defects of a funding request.
///
/// Reported by `FundingRequest::check`; the funder treats any of them as an
/// invariant violation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedRequest {
    /// Participant index does not name a participant.
    #[error("participant index {index} out of range for {parts} participants")]
    IndexOutOfRange { index: usize, parts: usize },

    /// Allocation rows do not match the participant count.
    #[error("allocation has {rows} balance rows, channel has {parts} participants")]
    RowCountMismatch { rows: usize, parts: usize },

    /// A participant row does not cover every asset.
    #[error("participant {participant} has {columns} balances for {assets} assets")]
    ColumnCountMismatch {
        participant: usize,
        columns: usize,
        assets: usize,
    },
}

//! # Domain Errors
//!
//! Error types for channel funding.
//!
//! Malformed funding requests are caller bugs and abort through
//! `invariant_violation!`; they have no variant here.

use shared_types::{Address, ChannelId};
use std::fmt;
use thiserror::Error;

/// Step of funding one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Checking that the funder can handle the asset.
    Validate,
    /// Querying the amount already deposited.
    Query,
    /// Submitting a deposit and awaiting its confirmation.
    Deposit,
    /// Waiting for the other participants' deposits.
    Await,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Validate => "validate",
            Stage::Query => "query",
            Stage::Deposit => "deposit",
            Stage::Await => "await",
        })
    }
}

/// Errors reported by a ledger client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The ledger knows no channel with this ID.
    #[error("Unknown channel: {0}")]
    UnknownChannel(ChannelId),

    /// The address is not a participant of the channel.
    #[error("Address {participant} is not a participant of channel {channel}")]
    UnknownParticipant {
        /// Channel ID
        channel: ChannelId,
        /// Rejected address
        participant: Address,
    },

    /// The transaction was rejected or reverted.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// The ledger could not be reached.
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

impl LedgerError {
    /// Whether the error means the request does not match the ledger.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::UnknownChannel(_) | LedgerError::UnknownParticipant { .. }
        )
    }
}

/// Funding failure, naming the asset index and stage that failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FundingError {
    /// The caller canceled funding.
    #[error("Funding canceled at asset {asset} ({stage})")]
    Canceled {
        /// Asset index
        asset: usize,
        /// Failed stage
        stage: Stage,
    },

    /// The funding deadline passed.
    #[error("Funding timed out at asset {asset} ({stage})")]
    Timeout {
        /// Asset index
        asset: usize,
        /// Failed stage
        stage: Stage,
    },

    /// A ledger transaction or query failed. Retrying is safe.
    #[error("Ledger failure at asset {asset} ({stage}): {reason}")]
    TransactionFailed {
        /// Asset index
        asset: usize,
        /// Failed stage
        stage: Stage,
        /// Ledger error
        reason: String,
    },

    /// The request does not match the ledger. Retrying needs a corrected
    /// request.
    #[error("Invalid funding at asset {asset} ({stage}): {reason}")]
    Validation {
        /// Asset index
        asset: usize,
        /// Failed stage
        stage: Stage,
        /// Validation failure
        reason: String,
    },
}

impl FundingError {
    /// Classify a ledger error.
    pub fn from_ledger(err: LedgerError, asset: usize, stage: Stage) -> Self {
        let reason = err.to_string();
        if err.is_validation() {
            FundingError::Validation {
                asset,
                stage,
                reason,
            }
        } else {
            FundingError::TransactionFailed {
                asset,
                stage,
                reason,
            }
        }
    }

    /// Index of the asset that failed.
    pub fn asset(&self) -> usize {
        match self {
            FundingError::Canceled { asset, .. }
            | FundingError::Timeout { asset, .. }
            | FundingError::TransactionFailed { asset, .. }
            | FundingError::Validation { asset, .. } => *asset,
        }
    }

    /// Stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            FundingError::Canceled { stage, .. }
            | FundingError::Timeout { stage, .. }
            | FundingError::TransactionFailed { stage, .. }
            | FundingError::Validation { stage, .. } => *stage,
        }
    }

    /// Whether re-invoking funding with the same request can succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FundingError::Validation { .. })
    }
}

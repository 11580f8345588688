//! # Funding Request
//!
//! Argument contract of a funding attempt. A request is immutable and may be
//! reused for retries: funding is idempotent.

use crate::channel::{Allocation, ChannelParams};
use crate::entities::{Address, U256};
use crate::errors::MalformedRequest;
use std::sync::Arc;

/// Request to fund one participant's share of a channel.
///
/// Params and allocation are shared by reference between the participants'
/// requests; they are never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingRequest {
    /// Channel parameters.
    pub params: Arc<ChannelParams>,
    /// Allocation to fund.
    pub allocation: Arc<Allocation>,
    /// Index of the local participant in `params.participants`.
    pub participant_index: usize,
}

impl FundingRequest {
    /// Create a funding request.
    pub fn new(
        params: Arc<ChannelParams>,
        allocation: Arc<Allocation>,
        participant_index: usize,
    ) -> Self {
        Self {
            params,
            allocation,
            participant_index,
        }
    }

    /// Check that the request is structurally sound.
    ///
    /// Requests without assets are always sound: there is nothing to fund.
    pub fn check(&self) -> Result<(), MalformedRequest> {
        if self.allocation.assets.is_empty() {
            return Ok(());
        }

        let parts = self.params.num_parts();
        if self.participant_index >= parts {
            return Err(MalformedRequest::IndexOutOfRange {
                index: self.participant_index,
                parts,
            });
        }

        let rows = self.allocation.num_parts();
        if rows != parts {
            return Err(MalformedRequest::RowCountMismatch { rows, parts });
        }

        let assets = self.allocation.assets.len();
        for (participant, row) in self.allocation.balances.iter().enumerate() {
            if row.len() != assets {
                return Err(MalformedRequest::ColumnCountMismatch {
                    participant,
                    columns: row.len(),
                    assets,
                });
            }
        }

        Ok(())
    }

    /// Address of the local participant, if the index is in range.
    pub fn participant(&self) -> Option<Address> {
        self.params.participants.get(self.participant_index).copied()
    }

    /// The local participant's balance per asset.
    pub fn own_balances(&self) -> &[U256] {
        self.allocation
            .participant_balances(self.participant_index)
            .unwrap_or(&[])
    }

    /// Whether the local participant has nothing to deposit.
    pub fn is_noop(&self) -> bool {
        self.allocation.assets.is_empty() || self.allocation.is_zero_for(self.participant_index)
    }
}

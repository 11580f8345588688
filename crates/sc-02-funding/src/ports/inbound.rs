//! # Inbound Ports
//!
//! API offered to the channel client.

use crate::domain::FundingError;
use async_trait::async_trait;
use shared_types::{Context, FundingRequest};

/// Funds channels.
#[async_trait]
pub trait ChannelFunder: Send + Sync {
    /// Deposit the local participant's share of `request.allocation`.
    ///
    /// Idempotent: amounts already on the ledger are not deposited again.
    ///
    /// # Panics
    ///
    /// If `request` is malformed.
    async fn fund(&self, ctx: &Context, request: &FundingRequest) -> Result<(), FundingError>;

    /// Wait until every participant's deposits cover the allocation.
    async fn await_funded(
        &self,
        ctx: &Context,
        request: &FundingRequest,
    ) -> Result<(), FundingError>;
}

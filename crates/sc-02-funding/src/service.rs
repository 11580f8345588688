//! # Funder Service
//!
//! Deposits the local participant's share of a channel allocation.
//!
//! ## Protocol
//!
//! ```text
//! for every asset with a non-zero own balance (concurrently):
//!     have = ledger.deposited_amount(channel, asset, me)
//!     if have < want:
//!         ledger.deposit(channel, asset, me, want - have)
//! ```
//!
//! Every participant runs its own funder; the ledger's per-call atomicity is
//! the only coordination between them. Querying before depositing makes
//! `fund` idempotent, so a failed or canceled attempt is retried by calling
//! it again with the same request.

use crate::config::FunderConfig;
use crate::domain::{FundingError, LedgerError, Stage};
use crate::ports::inbound::ChannelFunder;
use crate::ports::outbound::LedgerClient;
use async_trait::async_trait;
use futures::future::try_join_all;
use sc_01_channel_backend::{ChannelBackend, EthereumBackend};
use shared_types::{
    invariant_violation, Address, Asset, ChannelId, Context, ContextError, FundingRequest, U256,
};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Funds channels on one ledger.
pub struct Funder<L, B = EthereumBackend> {
    ledger: Arc<L>,
    backend: B,
    assets: Vec<Asset>,
    config: FunderConfig,
}

impl<L: LedgerClient, B: ChannelBackend> Funder<L, B> {
    /// Create a funder depositing `assets` into `ledger`.
    ///
    /// Requests naming any other asset fail with
    /// [`FundingError::Validation`].
    pub fn new(ledger: Arc<L>, backend: B, assets: Vec<Asset>, config: FunderConfig) -> Self {
        Self {
            ledger,
            backend,
            assets,
            config,
        }
    }

    /// Assets this funder can deposit.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Whether this funder can deposit `asset`.
    pub fn supports(&self, asset: &Asset) -> bool {
        self.assets.contains(asset)
    }

    /// The ledger this funder deposits into.
    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    fn check_request(&self, request: &FundingRequest) {
        if let Err(err) = request.check() {
            invariant_violation!("malformed funding request: {}", err);
        }
    }

    fn check_assets(&self, request: &FundingRequest) -> Result<(), FundingError> {
        match request
            .allocation
            .assets
            .iter()
            .position(|asset| !self.supports(asset))
        {
            Some(idx) => Err(FundingError::Validation {
                asset: idx,
                stage: Stage::Validate,
                reason: format!(
                    "asset holder {} not supported by this funder",
                    request.allocation.assets[idx].holder()
                ),
            }),
            None => Ok(()),
        }
    }

    async fn fund_asset(
        &self,
        ctx: &Context,
        channel: ChannelId,
        idx: usize,
        asset: &Asset,
        participant: Address,
        want: U256,
    ) -> Result<(), FundingError> {
        let have = guarded(
            ctx,
            idx,
            Stage::Query,
            self.ledger.deposited_amount(channel, asset, participant),
        )
        .await?;
        if have >= want {
            debug!(%channel, asset = idx, %participant, %have, "asset already funded");
            return Ok(());
        }

        let receipt = guarded(
            ctx,
            idx,
            Stage::Deposit,
            self.ledger.deposit(channel, asset, participant, want - have),
        )
        .await?;
        info!(
            %channel,
            asset = idx,
            %participant,
            amount = %receipt.amount,
            tx = %receipt.tx_id,
            "asset funded"
        );
        Ok(())
    }

    /// Index of the first asset some participant has not fully deposited.
    async fn first_unfunded(
        &self,
        ctx: &Context,
        channel: ChannelId,
        request: &FundingRequest,
    ) -> Result<Option<usize>, FundingError> {
        let alloc = &request.allocation;
        for (idx, asset) in alloc.assets.iter().enumerate() {
            for (part, row) in request.params.participants.iter().zip(&alloc.balances) {
                let want = row.get(idx).copied().unwrap_or_default();
                if want.is_zero() {
                    continue;
                }
                let have = guarded(
                    ctx,
                    idx,
                    Stage::Await,
                    self.ledger.deposited_amount(channel, asset, *part),
                )
                .await?;
                if have < want {
                    return Ok(Some(idx));
                }
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl<L: LedgerClient, B: ChannelBackend> ChannelFunder for Funder<L, B> {
    async fn fund(&self, ctx: &Context, request: &FundingRequest) -> Result<(), FundingError> {
        self.check_request(request);
        if request.is_noop() {
            debug!(participant = request.participant_index, "nothing to fund");
            return Ok(());
        }
        let Some(participant) = request.participant() else {
            invariant_violation!(
                "participant index {} out of range",
                request.participant_index
            );
        };
        self.check_assets(request)?;
        if let Some(err) = ctx.err() {
            return Err(aborted(err, 0, Stage::Query));
        }

        let channel = self.backend.channel_id(&request.params);
        debug!(%channel, %participant, assets = request.allocation.assets.len(), "funding");

        let deposits = request
            .allocation
            .assets
            .iter()
            .zip(request.own_balances())
            .enumerate()
            .filter(|(_, (_, want))| !want.is_zero())
            .map(|(idx, (asset, want))| {
                self.fund_asset(ctx, channel, idx, asset, participant, *want)
            });
        try_join_all(deposits).await?;

        info!(%channel, %participant, "participant funded");
        Ok(())
    }

    async fn await_funded(
        &self,
        ctx: &Context,
        request: &FundingRequest,
    ) -> Result<(), FundingError> {
        self.check_request(request);
        if request.allocation.assets.is_empty() {
            return Ok(());
        }
        self.check_assets(request)?;

        let channel = self.backend.channel_id(&request.params);
        while let Some(idx) = self.first_unfunded(ctx, channel, request).await? {
            debug!(%channel, asset = idx, "waiting for deposits");
            ctx.run(tokio::time::sleep(self.config.poll_interval))
                .await
                .map_err(|err| aborted(err, idx, Stage::Await))?;
        }

        info!(%channel, "channel fully funded");
        Ok(())
    }
}

/// Run a ledger call bounded by `ctx`.
async fn guarded<T, F>(ctx: &Context, asset: usize, stage: Stage, call: F) -> Result<T, FundingError>
where
    F: Future<Output = Result<T, LedgerError>>,
{
    match ctx.run(call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            warn!(asset, %stage, %err, "ledger call failed");
            Err(FundingError::from_ledger(err, asset, stage))
        }
        Err(err) => {
            warn!(asset, %stage, %err, "funding aborted");
            Err(aborted(err, asset, stage))
        }
    }
}

fn aborted(err: ContextError, asset: usize, stage: Stage) -> FundingError {
    match err {
        ContextError::Canceled => FundingError::Canceled { asset, stage },
        ContextError::DeadlineExceeded => FundingError::Timeout { asset, stage },
    }
}

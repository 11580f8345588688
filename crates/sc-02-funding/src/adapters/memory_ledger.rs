//! In-Memory Ledger Adapter
//!
//! Implements `LedgerClient` over process-local holdings, shared by every
//! funder of a test or simulation.
//!
//! Each query and deposit is atomic. Optional features:
//! - confirmation latency on deposits
//! - a channel registry: once enabled, unknown channels and non-participants
//!   are rejected
//! - injected failures for the next deposits

use crate::domain::LedgerError;
use crate::ports::outbound::{DepositReceipt, LedgerClient};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared_types::{Address, Asset, ChannelId, U256};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct HoldingKey {
    channel: ChannelId,
    holder: Address,
    participant: Address,
}

/// Ledger kept in memory.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    /// Deposited amount per (channel, asset holder, participant).
    holdings: RwLock<HashMap<HoldingKey, U256>>,
    /// Registered channels and their participants.
    channels: RwLock<HashMap<ChannelId, Vec<Address>>>,
    /// Reject channels that are not registered.
    strict: bool,
    /// Delay before a deposit is confirmed.
    latency: Duration,
    /// Errors returned by the next deposits, in order.
    failures: Mutex<VecDeque<LedgerError>>,
    submissions: AtomicUsize,
    queries: AtomicUsize,
}

impl InMemoryLedger {
    /// Ledger accepting deposits for any channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger accepting only channels added with
    /// [`register_channel`](Self::register_channel).
    pub fn with_registry() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Delay every deposit confirmation by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Register a channel and its participants.
    pub fn register_channel(&self, channel: ChannelId, participants: Vec<Address>) {
        debug!(%channel, parts = participants.len(), "channel registered");
        self.channels.write().insert(channel, participants);
    }

    /// Fail the next `count` deposits with `TransactionFailed(reason)`.
    pub fn fail_next_deposits(&self, count: usize, reason: &str) {
        let mut failures = self.failures.lock();
        for _ in 0..count {
            failures.push_back(LedgerError::TransactionFailed(reason.to_string()));
        }
    }

    /// Number of deposit transactions submitted, including failed ones.
    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }

    /// Number of balance queries served.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Amount deposited by `participant` into `holder` for `channel`.
    pub fn holdings(&self, channel: ChannelId, holder: Address, participant: Address) -> U256 {
        self.holdings
            .read()
            .get(&HoldingKey {
                channel,
                holder,
                participant,
            })
            .copied()
            .unwrap_or_default()
    }

    /// Total deposited into `holder` for `channel` by all participants.
    pub fn total_deposited(&self, channel: ChannelId, holder: Address) -> U256 {
        self.holdings
            .read()
            .iter()
            .filter(|(k, _)| k.channel == channel && k.holder == holder)
            .fold(U256::zero(), |acc, (_, v)| acc.saturating_add(*v))
    }

    fn check_channel(&self, channel: ChannelId, participant: Address) -> Result<(), LedgerError> {
        if !self.strict {
            return Ok(());
        }
        let channels = self.channels.read();
        let parts = channels
            .get(&channel)
            .ok_or(LedgerError::UnknownChannel(channel))?;
        if !parts.contains(&participant) {
            return Err(LedgerError::UnknownParticipant {
                channel,
                participant,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn deposited_amount(
        &self,
        channel: ChannelId,
        asset: &Asset,
        participant: Address,
    ) -> Result<U256, LedgerError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.check_channel(channel, participant)?;
        Ok(self.holdings(channel, asset.holder(), participant))
    }

    async fn deposit(
        &self,
        channel: ChannelId,
        asset: &Asset,
        participant: Address,
        amount: U256,
    ) -> Result<DepositReceipt, LedgerError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        self.check_channel(channel, participant)?;

        let injected = self.failures.lock().pop_front();
        if let Some(err) = injected {
            warn!(%channel, %participant, %err, "injected deposit failure");
            return Err(err);
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let holder = asset.holder();
        let total = {
            let mut holdings = self.holdings.write();
            let entry = holdings
                .entry(HoldingKey {
                    channel,
                    holder,
                    participant,
                })
                .or_default();
            let total = entry
                .checked_add(amount)
                .ok_or_else(|| LedgerError::TransactionFailed("holdings overflow".into()))?;
            *entry = total;
            total
        };

        let receipt = DepositReceipt {
            tx_id: Uuid::new_v4(),
            channel,
            holder,
            participant,
            amount,
            total,
        };
        info!(
            %channel,
            %holder,
            %participant,
            %amount,
            %total,
            tx = %receipt.tx_id,
            "deposit confirmed"
        );
        Ok(receipt)
    }
}

//! # Outbound Ports
//!
//! The ledger holding channel deposits.
//!
//! Both calls are atomic on the ledger and can be abandoned by dropping the
//! future. A deposit whose future is dropped before confirmation may or may
//! not have been applied; callers re-query before depositing again.

use crate::domain::LedgerError;
use async_trait::async_trait;
use shared_types::{Address, Asset, ChannelId, U256};
use uuid::Uuid;

/// Ledger client - outbound port.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Amount of `asset` that `participant` has deposited for `channel`.
    async fn deposited_amount(
        &self,
        channel: ChannelId,
        asset: &Asset,
        participant: Address,
    ) -> Result<U256, LedgerError>;

    /// Deposit `amount` of `asset` for `participant` and wait for
    /// confirmation.
    async fn deposit(
        &self,
        channel: ChannelId,
        asset: &Asset,
        participant: Address,
        amount: U256,
    ) -> Result<DepositReceipt, LedgerError>;
}

/// Confirmation of a deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositReceipt {
    /// Transaction ID.
    pub tx_id: Uuid,
    /// Funded channel.
    pub channel: ChannelId,
    /// Asset holder that received the deposit.
    pub holder: Address,
    /// Depositing participant.
    pub participant: Address,
    /// Deposited amount.
    pub amount: U256,
    /// Participant's holdings after the deposit.
    pub total: U256,
}

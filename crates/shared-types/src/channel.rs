//! # Channel Data Model
//!
//! Parameters, states and allocations of a state channel.
//!
//! ## Shape
//!
//! ```text
//! ChannelParams ──(keccak256 ∘ encode)──► ChannelId
//!                                            │
//! State { id, version, allocation, app_data, is_final }
//!                        │
//!        Allocation { assets[a], balances[p][a], locked[s] }
//!                                                  │
//!                              SubAllocation { id, balances[a] }
//! ```
//!
//! `balances` is indexed `[participant][asset]`.

use crate::entities::{Address, ChannelId, U256};
use serde::{Deserialize, Serialize};

/// Immutable parameters of a channel. The channel ID is a pure function of
/// this tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelParams {
    /// Challenge duration in seconds.
    pub challenge_duration: u64,
    /// Nonce distinguishing channels with otherwise equal parameters.
    pub nonce: U256,
    /// Address of the app contract governing valid transitions.
    pub app_definition: Address,
    /// Participants, in channel order.
    pub participants: Vec<Address>,
}

impl ChannelParams {
    /// Create channel parameters.
    pub fn new(
        challenge_duration: u64,
        participants: Vec<Address>,
        app_definition: Address,
        nonce: U256,
    ) -> Self {
        Self {
            challenge_duration,
            nonce,
            app_definition,
            participants,
        }
    }

    /// Number of participants.
    pub fn num_parts(&self) -> usize {
        self.participants.len()
    }

    /// Index of `address` among the participants.
    pub fn participant_index(&self, address: &Address) -> Option<usize> {
        self.participants.iter().position(|p| p == address)
    }
}

/// Supported asset kinds.
///
/// Every asset is identified on the ledger by its asset-holder contract,
/// which is the address used in the canonical encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    /// Native currency held by an asset-holder contract.
    Ether {
        /// Asset-holder contract.
        holder: Address,
    },
    /// ERC-20 token held by an asset-holder contract.
    Erc20 {
        /// Asset-holder contract.
        holder: Address,
        /// Token contract.
        token: Address,
    },
}

impl Asset {
    /// Asset-holder address, as encoded in allocations.
    pub fn holder(&self) -> Address {
        match self {
            Asset::Ether { holder } | Asset::Erc20 { holder, .. } => *holder,
        }
    }
}

/// Funds of one asset vector earmarked for a sub-channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubAllocation {
    /// Sub-channel ID.
    pub id: ChannelId,
    /// Locked amount per asset.
    pub balances: Vec<U256>,
}

/// Distribution of a channel's funds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Allocation {
    /// Assets, in allocation order.
    pub assets: Vec<Asset>,
    /// Balance of each participant per asset, indexed `[participant][asset]`.
    pub balances: Vec<Vec<U256>>,
    /// Funds locked in sub-channels.
    pub locked: Vec<SubAllocation>,
}

impl Allocation {
    /// Create an allocation without locked funds.
    pub fn new(assets: Vec<Asset>, balances: Vec<Vec<U256>>) -> Self {
        Self {
            assets,
            balances,
            locked: Vec::new(),
        }
    }

    /// Number of participant rows.
    pub fn num_parts(&self) -> usize {
        self.balances.len()
    }

    /// Balances of participant `idx` across all assets.
    pub fn participant_balances(&self, idx: usize) -> Option<&[U256]> {
        self.balances.get(idx).map(Vec::as_slice)
    }

    /// Sum of the participants' balances for asset `asset_idx`.
    ///
    /// Locked sub-allocations are not included; they are funded by their
    /// parent channel's participants.
    pub fn participant_sum(&self, asset_idx: usize) -> U256 {
        self.balances
            .iter()
            .filter_map(|row| row.get(asset_idx))
            .fold(U256::zero(), |acc, bal| acc.saturating_add(*bal))
    }

    /// Whether participant `idx` holds nothing in any asset.
    pub fn is_zero_for(&self, idx: usize) -> bool {
        self.participant_balances(idx)
            .map_or(true, |row| row.iter().all(U256::is_zero))
    }
}

/// Off-chain state of a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Channel this state belongs to.
    pub id: ChannelId,
    /// Version; strictly increasing across updates.
    pub version: u64,
    /// Current distribution of funds.
    pub allocation: Allocation,
    /// Opaque application data.
    pub app_data: Vec<u8>,
    /// Whether this is the final state of the channel.
    pub is_final: bool,
}

impl State {
    /// Initial (version 0) state of a channel.
    pub fn initial(id: ChannelId, allocation: Allocation, app_data: Vec<u8>) -> Self {
        Self {
            id,
            version: 0,
            allocation,
            app_data,
            is_final: false,
        }
    }
}

//! Shared fixtures for the integration flows.

use shared_bus::{Category, Msg};
use shared_crypto::{Account, Secp256k1Account};
use shared_types::{Address, Allocation, Asset, ChannelParams, Signature, State, U256};
use std::sync::Arc;

/// Challenge duration of test channels, in seconds.
pub const CHALLENGE_DURATION: u64 = 60;

/// Messages exchanged between test participants.
#[derive(Debug, Clone)]
pub enum WireMsg {
    /// Keep-alive.
    Ping(u64),
    /// Channel proposal carrying everything needed to fund.
    Proposal {
        /// Proposed parameters.
        params: Arc<ChannelParams>,
        /// Initial allocation.
        allocation: Arc<Allocation>,
    },
    /// Signed channel state.
    Update {
        /// New state.
        state: State,
        /// Sender's signature over `state`.
        signature: Signature,
    },
}

impl Msg for WireMsg {
    fn category(&self) -> Category {
        match self {
            WireMsg::Ping(_) => Category::Control,
            WireMsg::Proposal { .. } => Category::ChannelProposal,
            WireMsg::Update { .. } => Category::ChannelUpdate,
        }
    }
}

/// Install quiet logging for the test binary.
pub fn init_logging() {
    let config = sc_telemetry::TelemetryConfig {
        log_level: "warn".to_string(),
        ..sc_telemetry::TelemetryConfig::for_component("tests")
    };
    sc_telemetry::init_logging(&config).expect("valid test log filter");
}

/// The asset every test channel is funded in.
pub fn ether() -> Asset {
    Asset::Ether {
        holder: Address::new([0xEE; 20]),
    }
}

/// `n` fresh accounts.
pub fn accounts(n: usize) -> Vec<Secp256k1Account> {
    (0..n).map(|_| Secp256k1Account::generate()).collect()
}

/// Parameters and single-asset allocation of a channel between `accounts`.
pub fn proposal(
    accounts: &[Secp256k1Account],
    balances: &[u64],
) -> (Arc<ChannelParams>, Arc<Allocation>) {
    let params = ChannelParams::new(
        CHALLENGE_DURATION,
        accounts.iter().map(|a| a.address()).collect(),
        Address::new([0xAA; 20]),
        U256::from(rand::random::<u64>()),
    );
    let allocation = Allocation::new(
        vec![ether()],
        balances.iter().map(|b| vec![U256::from(*b)]).collect(),
    );
    (Arc::new(params), Arc::new(allocation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_repeatable() {
        init_logging();
        init_logging();
    }
}

//! # Canonical Channel Codec
//!
//! Byte encoding of channel values, bit-exact with the adjudicator
//! contract's own `abi.encode`.
//!
//! | Value | ABI tuple |
//! |-------|-----------|
//! | Params | `(uint256 challengeDuration, uint256 nonce, address app, address[] participants)` |
//! | State | `(bytes32 channelID, uint64 version, bytes allocation, bytes appData, bool isFinal)` |
//! | Allocation | `(address[] assets, uint256[][] balances, bytes locked)` |
//! | SubAllocation | `(bytes32 id, uint256[] balances)` |
//!
//! `locked` is the concatenation of the encoded sub-allocations. Assets are
//! encoded by their asset-holder address; balances keep the
//! `[participant][asset]` order of the model.
//!
//! Every field type has an encoding, so encoding cannot fail. Shape is not
//! checked here: a ragged balance matrix still has a unique encoding.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address as AbiAddress, B256, U256 as AbiU256};
use primitive_types::U256;
use shared_crypto::keccak256;
use shared_types::{Address, Allocation, ChannelId, ChannelParams, Hash, State, SubAllocation};

/// Encode channel parameters.
pub fn encode_params(params: &ChannelParams) -> Vec<u8> {
    DynSolValue::Tuple(vec![
        uint(U256::from(params.challenge_duration)),
        uint(params.nonce),
        address(params.app_definition),
        address_array(params.participants.iter().copied()),
    ])
    .abi_encode_params()
}

/// Encode a channel state.
pub fn encode_state(state: &State) -> Vec<u8> {
    DynSolValue::Tuple(vec![
        word(state.id.0),
        DynSolValue::Uint(AbiU256::from(state.version), 64),
        DynSolValue::Bytes(encode_allocation(&state.allocation)),
        DynSolValue::Bytes(state.app_data.clone()),
        DynSolValue::Bool(state.is_final),
    ])
    .abi_encode_params()
}

/// Encode an allocation.
pub fn encode_allocation(alloc: &Allocation) -> Vec<u8> {
    let locked: Vec<u8> = alloc.locked.iter().flat_map(encode_sub_alloc).collect();
    DynSolValue::Tuple(vec![
        address_array(alloc.assets.iter().map(|a| a.holder())),
        DynSolValue::Array(alloc.balances.iter().map(|row| uint_array(row)).collect()),
        DynSolValue::Bytes(locked),
    ])
    .abi_encode_params()
}

/// Encode a sub-allocation.
pub fn encode_sub_alloc(sub: &SubAllocation) -> Vec<u8> {
    DynSolValue::Tuple(vec![word(sub.id.0), uint_array(&sub.balances)]).abi_encode_params()
}

fn uint(n: U256) -> DynSolValue {
    let mut be = [0u8; 32];
    n.to_big_endian(&mut be);
    DynSolValue::Uint(AbiU256::from_be_bytes(be), 256)
}

fn address(a: Address) -> DynSolValue {
    DynSolValue::Address(AbiAddress::from(a.0))
}

fn word(h: Hash) -> DynSolValue {
    DynSolValue::FixedBytes(B256::from(h), 32)
}

fn uint_array(values: &[U256]) -> DynSolValue {
    DynSolValue::Array(values.iter().copied().map(uint).collect())
}

fn address_array(addresses: impl IntoIterator<Item = Address>) -> DynSolValue {
    DynSolValue::Array(addresses.into_iter().map(address).collect())
}

/// Channel ID: Keccak-256 of the encoded parameters.
pub fn channel_id(params: &ChannelParams) -> ChannelId {
    ChannelId(keccak256(&encode_params(params)))
}

//! # Channel Backend Service
//!
//! Application service implementing the `ChannelBackend` trait for
//! Ethereum adjudicators.
//!
//! ## Architecture
//!
//! - Implements the inbound port (`ChannelBackend`)
//! - Uses the outbound ports (`Account`, `SignatureVerifier`) for key
//!   operations
//! - Delegates encoding to the domain layer

use crate::domain::codec;
use crate::domain::errors::BackendError;
use crate::ports::inbound::ChannelBackend;
use crate::ports::outbound::{Account, SignatureVerifier};
use shared_crypto::EthereumVerifier;
use shared_types::{Address, ChannelId, ChannelParams, Signature, State};
use tracing::debug;

/// Channel backend for Ethereum adjudicators.
#[derive(Debug, Clone, Default)]
pub struct EthereumBackend<V = EthereumVerifier> {
    verifier: V,
}

impl EthereumBackend {
    /// Backend using the standard Ethereum signature scheme.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: SignatureVerifier> EthereumBackend<V> {
    /// Backend using a custom verifier.
    pub fn with_verifier(verifier: V) -> Self {
        Self { verifier }
    }
}

impl<V: SignatureVerifier> ChannelBackend for EthereumBackend<V> {
    fn channel_id(&self, params: &ChannelParams) -> ChannelId {
        codec::channel_id(params)
    }

    fn sign(
        &self,
        account: &dyn Account,
        params: &ChannelParams,
        state: &State,
    ) -> Result<Signature, BackendError> {
        let id = self.channel_id(params);
        if state.id != id {
            return Err(BackendError::InvalidArgument(format!(
                "state of channel {} signed with params of channel {}",
                state.id, id
            )));
        }

        let sig = account.sign_data(&codec::encode_state(state))?;
        debug!(channel = %id, version = state.version, signer = %account.address(), "signed state");
        Ok(sig)
    }

    fn verify(
        &self,
        address: &Address,
        params: &ChannelParams,
        state: &State,
        signature: &Signature,
    ) -> Result<bool, BackendError> {
        let valid = self
            .verifier
            .verify_signature(&codec::encode_state(state), signature, address)?;
        if !valid {
            return Ok(false);
        }

        let id = self.channel_id(params);
        if state.id != id {
            debug!(channel = %id, state_channel = %state.id, "signature over foreign channel");
            return Ok(false);
        }
        Ok(true)
    }
}

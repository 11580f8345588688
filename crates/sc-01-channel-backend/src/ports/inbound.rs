//! # Inbound Ports (Driving Ports / API)
//!
//! Channel identity and state signing as used by channel logic.

use crate::domain::errors::BackendError;
use shared_crypto::Account;
use shared_types::{Address, ChannelId, ChannelParams, Signature, State};

/// Channel identity and state signing.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait ChannelBackend: Send + Sync {
    /// Derive the channel ID from its parameters. Pure and deterministic.
    fn channel_id(&self, params: &ChannelParams) -> ChannelId;

    /// Sign `state` of the channel described by `params`.
    ///
    /// # Errors
    /// - `InvalidArgument` if `state` does not belong to `params`' channel
    /// - `Account` if the account fails to sign
    fn sign(
        &self,
        account: &dyn Account,
        params: &ChannelParams,
        state: &State,
    ) -> Result<Signature, BackendError>;

    /// Check that `signature` over `state` was made by `address`.
    ///
    /// Returns `Ok(false)` for a valid signature by anyone else, and for a
    /// state that does not belong to `params`' channel.
    ///
    /// # Errors
    /// - `MalformedSignature` if the signature cannot be interpreted
    fn verify(
        &self,
        address: &Address,
        params: &ChannelParams,
        state: &State,
        signature: &Signature,
    ) -> Result<bool, BackendError>;
}

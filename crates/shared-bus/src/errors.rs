//! Dispatcher error types.

use shared_types::ContextError;
use thiserror::Error;

/// Errors from subscription and dispatch operations.
///
/// A duplicate subscription is not listed: it is an invariant violation and
/// aborts instead of being returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The peer connection was closed.
    #[error("Peer connection closed")]
    ConnectionClosed,

    /// The caller canceled a blocking dispatch.
    #[error("Dispatch canceled")]
    Canceled,

    /// A blocking dispatch ran past its deadline.
    #[error("Dispatch timed out")]
    Timeout,

    /// The transport feeding the peer failed.
    #[error("Transport failed: {0}")]
    Transport(String),
}

impl From<ContextError> for DispatchError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Canceled => Self::Canceled,
            ContextError::DeadlineExceeded => Self::Timeout,
        }
    }
}

//! # Peer
//!
//! Connection-scoped owner of one subscription registry.
//!
//! ```text
//! transport ──► Peer::serve ──► dispatch ──► Receiver (per category)
//!                   │
//!                   └── stream ends / fails ──► close ──► receivers closed
//! ```
//!
//! A single task drives [`Peer::serve`], which keeps messages from one peer
//! FIFO per receiver.

use crate::category::{Category, Msg};
use crate::errors::DispatchError;
use crate::receiver::{MsgTuple, Receiver};
use crate::subscriptions::Subscriptions;
use shared_types::{Address, Context};
use std::fmt;
use std::sync::Arc;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A connected peer.
pub struct Peer<M> {
    id: Uuid,
    address: Address,
    subs: Subscriptions<M>,
}

impl<M: Msg> Peer<M> {
    /// Create a peer for a freshly established connection.
    pub fn new(address: Address) -> Self {
        Self {
            id: Uuid::new_v4(),
            address,
            subs: Subscriptions::new(),
        }
    }

    /// Connection identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Address of the remote participant.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Subscribe `receiver` to messages of `category`.
    ///
    /// Fails with [`DispatchError::ConnectionClosed`] once the peer is
    /// closed.
    ///
    /// # Panics
    ///
    /// If `receiver` is already subscribed to `category`.
    pub async fn subscribe(
        &self,
        category: Category,
        receiver: &Arc<Receiver<M>>,
    ) -> Result<(), DispatchError> {
        self.subs.add(category, receiver).await
    }

    /// Unsubscribe `receiver` from `category`. No-op if not subscribed.
    pub async fn unsubscribe(&self, category: Category, receiver: &Arc<Receiver<M>>) {
        self.subs.delete(category, receiver).await
    }

    /// Whether no receiver is subscribed. An empty peer can be torn down.
    pub async fn is_empty(&self) -> bool {
        self.subs.is_empty().await
    }

    /// Whether the connection was closed.
    pub async fn is_closed(&self) -> bool {
        self.subs.is_closed().await
    }

    /// Deliver a message from this peer to every receiver of its category,
    /// waiting for space in full queues.
    ///
    /// Returns the number of receivers reached.
    pub async fn dispatch(&self, msg: M) -> usize {
        self.dispatch_shared(Arc::new(msg)).await
    }

    /// [`dispatch`](Self::dispatch) bounded by `ctx`.
    ///
    /// On cancellation or deadline the message may already have reached
    /// some of the receivers.
    pub async fn dispatch_within(&self, ctx: &Context, msg: M) -> Result<usize, DispatchError> {
        ctx.run(self.dispatch(msg)).await.map_err(|err| {
            warn!(peer = %self.address, %err, "dispatch aborted");
            DispatchError::from(err)
        })
    }

    async fn dispatch_shared(&self, msg: Arc<M>) -> usize {
        self.subs
            .put(MsgTuple {
                peer: self.address,
                msg,
            })
            .await
    }

    /// Read loop: dispatch every message of `transport` until it ends or
    /// fails, then close the peer.
    pub async fn serve<S, E>(&self, transport: S) -> Result<(), DispatchError>
    where
        S: Stream<Item = Result<M, E>>,
        E: fmt::Display,
    {
        info!(peer = %self.address, conn = %self.id, "serving peer");
        tokio::pin!(transport);

        let mut result = Ok(());
        while let Some(item) = transport.next().await {
            match item {
                Ok(msg) => {
                    debug!(peer = %self.address, category = %msg.category(), "inbound");
                    self.dispatch(msg).await;
                }
                Err(err) => {
                    warn!(peer = %self.address, %err, "transport failed");
                    result = Err(DispatchError::Transport(err.to_string()));
                    break;
                }
            }
        }

        self.close().await;
        result
    }

    /// Tear down the connection: reject new subscriptions, drop all
    /// subscriptions and close their receivers. Idempotent.
    pub async fn close(&self) {
        if self.subs.close().await {
            info!(peer = %self.address, conn = %self.id, "peer closed");
        }
    }
}

impl<M> fmt::Debug for Peer<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Peer")
            .field("id", &self.id)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

//! # Receiver
//!
//! Registered consumer of dispatched messages. Each receiver owns a bounded
//! queue; a full queue makes the dispatching peer wait.
//!
//! Receivers are compared by identity: two receivers are the same only if
//! they are the same `Arc`.

use crate::category::Msg;
use crate::config::DispatchConfig;
use parking_lot::Mutex;
use shared_types::Address;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use uuid::Uuid;

/// A message together with the peer it came from.
pub struct MsgTuple<M> {
    /// Address of the source peer.
    pub peer: Address,
    /// The message.
    pub msg: Arc<M>,
}

impl<M> Clone for MsgTuple<M> {
    fn clone(&self) -> Self {
        Self {
            peer: self.peer,
            msg: Arc::clone(&self.msg),
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for MsgTuple<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MsgTuple")
            .field("peer", &self.peer)
            .field("msg", &self.msg)
            .finish()
    }
}

/// Bounded inbox for dispatched messages.
pub struct Receiver<M> {
    id: Uuid,
    tx: Mutex<Option<mpsc::Sender<MsgTuple<M>>>>,
    rx: tokio::sync::Mutex<mpsc::Receiver<MsgTuple<M>>>,
    closed: watch::Sender<bool>,
}

impl<M: Msg> Receiver<M> {
    /// Create a receiver holding up to `capacity` undelivered messages.
    pub fn new(capacity: usize) -> Arc<Self> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let (closed, _) = watch::channel(false);
        Arc::new(Self {
            id: Uuid::new_v4(),
            tx: Mutex::new(Some(tx)),
            rx: tokio::sync::Mutex::new(rx),
            closed,
        })
    }

    /// Create a receiver sized by `config`.
    pub fn from_config(config: &DispatchConfig) -> Arc<Self> {
        Self::new(config.receiver_capacity)
    }

    /// Identifier, for logs.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for the next message.
    ///
    /// Returns `None` once the receiver is closed and its queue drained.
    pub async fn next(&self) -> Option<MsgTuple<M>> {
        self.rx.lock().await.recv().await
    }

    /// Take the next message if one is queued.
    pub fn try_next(&self) -> Option<MsgTuple<M>> {
        self.rx.try_lock().ok()?.try_recv().ok()
    }

    /// Stop accepting messages. Queued messages can still be drained.
    /// Idempotent.
    pub fn close(&self) {
        self.tx.lock().take();
        self.closed.send_replace(true);
    }

    /// Whether the receiver was closed.
    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Enqueue a message, waiting for space. Returns whether it was queued.
    ///
    /// A pending delivery is abandoned when the receiver is closed.
    pub(crate) async fn deliver(&self, tuple: MsgTuple<M>) -> bool {
        let Some(tx) = self.tx.lock().clone() else {
            return false;
        };
        let mut closed = self.closed.subscribe();
        tokio::select! {
            biased;
            res = tx.send(tuple) => res.is_ok(),
            _ = closed.wait_for(|c| *c) => false,
        }
    }
}

impl<M> fmt::Debug for Receiver<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receiver")
            .field("id", &self.id)
            .field("closed", &*self.closed.borrow())
            .finish_non_exhaustive()
    }
}

//! # Subscription Registry
//!
//! Per-peer map from [`Category`] to the receivers subscribed to it.
//!
//! ## Locking
//!
//! - `add` / `delete` / `close` take the exclusive lock.
//! - `put` takes the shared lock and holds it for the whole delivery,
//!   including while it waits on a full receiver queue. Dispatches therefore
//!   run concurrently with each other but never overlap a registry change.
//! - `close` signals teardown on a `watch` channel before it queues for the
//!   exclusive lock. Blocked deliveries abort on that signal.

use crate::category::{Category, Msg};
use crate::errors::DispatchError;
use crate::receiver::{MsgTuple, Receiver};
use shared_types::invariant_violation;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{debug, trace};

struct Registry<M> {
    subs: HashMap<Category, Vec<Arc<Receiver<M>>>>,
    closed: bool,
}

/// Subscription registry of one peer.
pub struct Subscriptions<M> {
    inner: RwLock<Registry<M>>,
    shutdown: watch::Sender<bool>,
}

impl<M: Msg> Subscriptions<M> {
    /// Create an open, empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Registry {
                subs: HashMap::new(),
                closed: false,
            }),
            shutdown: watch::channel(false).0,
        }
    }

    /// Register `receiver` under `category`.
    ///
    /// # Panics
    ///
    /// If the pair is already registered.
    pub async fn add(
        &self,
        category: Category,
        receiver: &Arc<Receiver<M>>,
    ) -> Result<(), DispatchError> {
        let mut reg = self.inner.write().await;
        if reg.closed {
            return Err(DispatchError::ConnectionClosed);
        }

        let list = reg.subs.entry(category).or_default();
        if list.iter().any(|r| Arc::ptr_eq(r, receiver)) {
            invariant_violation!(
                "duplicate subscription of receiver {} to category {}",
                receiver.id(),
                category
            );
        }
        list.push(Arc::clone(receiver));
        debug!(%category, receiver = %receiver.id(), "subscribed");
        Ok(())
    }

    /// Remove `receiver` from `category`. No-op if it is not registered.
    pub async fn delete(&self, category: Category, receiver: &Arc<Receiver<M>>) {
        let mut reg = self.inner.write().await;
        let Some(list) = reg.subs.get_mut(&category) else {
            return;
        };
        if let Some(pos) = list.iter().position(|r| Arc::ptr_eq(r, receiver)) {
            list.swap_remove(pos);
            debug!(%category, receiver = %receiver.id(), "unsubscribed");
        }
        if list.is_empty() {
            reg.subs.remove(&category);
        }
    }

    /// Whether no category holds any receiver.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.subs.is_empty()
    }

    /// Whether the registry was closed.
    pub async fn is_closed(&self) -> bool {
        self.inner.read().await.closed
    }

    /// Deliver `tuple` to every open receiver of its category.
    ///
    /// Returns the number of receivers that queued the message.
    /// Deliveries still pending when the registry starts closing are
    /// abandoned and not counted.
    pub async fn put(&self, tuple: MsgTuple<M>) -> usize {
        let category = tuple.msg.category();
        let mut shutdown = self.shutdown.subscribe();
        if *shutdown.borrow_and_update() {
            return 0;
        }
        let reg = self.inner.read().await;
        let Some(list) = reg.subs.get(&category) else {
            trace!(%category, "no receivers");
            return 0;
        };

        let mut delivered = 0;
        for receiver in list {
            if receiver.is_closed() {
                continue;
            }
            tokio::select! {
                biased;
                queued = receiver.deliver(tuple.clone()) => {
                    if queued {
                        delivered += 1;
                    }
                }
                _ = shutdown.wait_for(|s| *s) => {
                    debug!(%category, delivered, "dispatch aborted by close");
                    return delivered;
                }
            }
        }
        debug!(%category, peer = %tuple.peer, delivered, "dispatched");
        delivered
    }

    /// Close the registry: reject new subscriptions, drop every
    /// subscription and close the dropped receivers.
    ///
    /// Pending deliveries are released first, without taking any lock.
    ///
    /// Returns whether this call closed the registry.
    pub async fn close(&self) -> bool {
        self.shutdown.send_replace(true);
        let mut reg = self.inner.write().await;
        let first = !reg.closed;
        reg.closed = true;
        for (_, list) in reg.subs.drain() {
            list.iter().for_each(|r| r.close());
        }
        first
    }
}

impl<M: Msg> Default for Subscriptions<M> {
    fn default() -> Self {
        Self::new()
    }
}

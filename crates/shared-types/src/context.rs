//! # Cancellation Context
//!
//! Per-call cancellation and deadlines for blocking operations (`fund`,
//! deadline-bounded dispatch).
//!
//! A context is cheap to clone; all clones observe the same cancellation.
//! Cancellation aborts the waiting call only: side effects that were already
//! committed externally are not rolled back.

use futures::future::select_all;
use std::future::{pending, Future};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::Instant;

/// Why a context is done.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ContextError {
    /// The context was canceled through its [`CancelHandle`].
    #[error("context canceled")]
    Canceled,

    /// The context's deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation and deadline carried into a blocking call.
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancel: Vec<watch::Receiver<bool>>,
}

/// Cancels every clone of the context it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancel the context. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Context {
    /// A context that is never done.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that expires after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A context that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancel: Vec::new(),
        }
    }

    /// Derive a cancelable context, keeping this context's deadline.
    ///
    /// A context that is already cancelable stays cancelable by its
    /// original handle as well.
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let mut cancel = self.cancel.clone();
        cancel.push(rx);
        let ctx = Self {
            deadline: self.deadline,
            cancel,
        };
        (ctx, CancelHandle { tx })
    }

    /// The deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Why the context is done, or `None` while it is still live.
    pub fn err(&self) -> Option<ContextError> {
        if self.is_canceled() {
            return Some(ContextError::Canceled);
        }
        match self.deadline {
            Some(at) if at <= Instant::now() => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves once the context is done.
    pub async fn done(&self) -> ContextError {
        if let Some(err) = self.err() {
            return err;
        }

        let canceled = wait_canceled(self.cancel.clone());
        let expired = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            _ = canceled => ContextError::Canceled,
            _ = expired => ContextError::DeadlineExceeded,
        }
    }

    /// Run `fut` until it completes or the context is done, whichever is
    /// first. A context that is already done never polls `fut`.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, ContextError> {
        if let Some(err) = self.err() {
            return Err(err);
        }
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            out = fut => Ok(out),
        }
    }

    fn is_canceled(&self) -> bool {
        self.cancel.iter().any(|rx| *rx.borrow())
    }
}

async fn wait_canceled(cancel: Vec<watch::Receiver<bool>>) {
    if cancel.is_empty() {
        return pending().await;
    }
    let waits = cancel.into_iter().map(|rx| Box::pin(wait_one(rx)));
    select_all(waits).await;
}

async fn wait_one(mut rx: watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        // A dropped handle can never cancel.
        if rx.changed().await.is_err() {
            return pending().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_background_never_done() {
        let ctx = Context::background();
        assert_eq!(ctx.err(), None);
        let res = tokio::time::timeout(Duration::from_millis(20), ctx.done()).await;
        assert!(res.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_expires() {
        let ctx = Context::with_timeout(Duration::from_secs(5));
        assert_eq!(ctx.err(), None);
        assert_eq!(ctx.done().await, ContextError::DeadlineExceeded);
        assert_eq!(ctx.err(), Some(ContextError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_cancel_wakes_waiters() {
        let (ctx, handle) = Context::background().with_cancel();
        let waiter = {
            let ctx = ctx.clone();
            tokio::spawn(async move { ctx.done().await })
        };
        handle.cancel();
        assert_eq!(waiter.await.unwrap(), ContextError::Canceled);
        assert_eq!(ctx.err(), Some(ContextError::Canceled));
    }

    #[tokio::test]
    async fn test_run_with_expired_context_skips_future() {
        let (ctx, handle) = Context::background().with_cancel();
        handle.cancel();

        let mut polled = false;
        let res = ctx
            .run(async {
                polled = true;
            })
            .await;
        assert_eq!(res, Err(ContextError::Canceled));
        assert!(!polled);
    }

    #[tokio::test]
    async fn test_run_completes() {
        let ctx = Context::with_timeout(Duration::from_secs(10));
        assert_eq!(ctx.run(async { 7 }).await, Ok(7));
    }

    #[tokio::test]
    async fn test_derived_context_follows_parent() {
        let (parent, handle) = Context::background().with_cancel();
        let (child, _child_handle) = parent.with_cancel();
        handle.cancel();
        assert_eq!(child.done().await, ContextError::Canceled);
    }

    #[tokio::test]
    async fn test_dropped_handle_never_cancels() {
        let (ctx, handle) = Context::background().with_cancel();
        drop(handle);
        let res = tokio::time::timeout(Duration::from_millis(20), ctx.done()).await;
        assert!(res.is_err());
    }
}

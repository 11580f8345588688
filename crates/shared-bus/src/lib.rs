//! # Shared Bus - Peer Message Dispatch
//!
//! Routes inbound peer messages to the protocol handlers that subscribed to
//! their category.
//!
//! ## Dispatch Pattern
//!
//! ```text
//! ┌──────────────┐  serve()/dispatch()  ┌───────────────┐
//! │  Transport   │ ───────────────────► │     Peer      │
//! └──────────────┘                      │ Subscriptions │
//!                                       └───────┬───────┘
//!                          by Category          │
//!                 ┌─────────────────────────────┼──────────────┐
//!                 ▼                             ▼              ▼
//!          ┌────────────┐               ┌────────────┐  ┌────────────┐
//!          │ Receiver A │               │ Receiver B │  │ Receiver C │
//!          └────────────┘               └────────────┘  └────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - **FIFO** per (source peer, receiver).
//! - **Backpressure:** a full receiver queue blocks the dispatching peer;
//!   messages are never dropped.
//! - **Teardown:** closing a peer closes every subscribed receiver.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod category;
pub mod config;
pub mod errors;
pub mod peer;
pub mod receiver;
pub mod subscriptions;

// Re-export main types
pub use category::{Category, Msg};
pub use config::{DispatchConfig, DEFAULT_RECEIVER_CAPACITY};
pub use errors::DispatchError;
pub use peer::Peer;
pub use receiver::{MsgTuple, Receiver};
pub use subscriptions::Subscriptions;

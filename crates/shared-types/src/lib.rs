//! # Shared Types Crate
//!
//! Protocol value types shared by the dispatcher, the channel backend and the
//! funder.
//!
//! ## Design Principles
//!
//! - **Value semantics**: `ChannelParams`, `State` and `Allocation` are plain
//!   values. Tasks share them read-only (usually behind an `Arc`) and never
//!   mutate another participant's copy.
//! - **Closed asset set**: assets are an explicit enum resolved at
//!   configuration time; there are no runtime downcasts.
//! - **Two error families**: recoverable environment errors are returned as
//!   `Result::Err`; invariant violations go through [`invariant_violation!`]
//!   and abort loudly.

pub mod channel;
pub mod clone_contract;
pub mod context;
pub mod entities;
pub mod errors;
pub mod funding;

pub use channel::{Allocation, Asset, ChannelParams, State, SubAllocation};
pub use clone_contract::{check_clone, verify_clone, CloneContract, CloneError, FieldBuffer, Sharing};
pub use context::{CancelHandle, Context, ContextError};
pub use entities::*;
pub use errors::MalformedRequest;
pub use funding::FundingRequest;

#[doc(hidden)]
pub use tracing as __tracing;

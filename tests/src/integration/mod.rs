//! Cross-crate integration flows.

pub mod funding_flow;
pub mod peer_lifecycle;
pub mod state_signing;

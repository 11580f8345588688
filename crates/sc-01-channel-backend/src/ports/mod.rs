//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that channel logic uses
//! - **Outbound (Driven)**: Signing capabilities this subsystem needs

pub mod inbound;
pub mod outbound;

//! # State-Channel Telemetry
//!
//! Structured logging for the state-channel crates.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sc_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::for_component("funder");
//! init_logging(&config)?;
//!
//! let span = sc_telemetry::channel_span!("fund", channel_id);
//! let _enter = span.enter();
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SC_SERVICE_NAME` | `state-channel` | Service name in logs |
//! | `SC_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directives |
//! | `SC_JSON_LOGS` | `false` | JSON output |
//! | `SC_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

#[doc(hidden)]
pub use tracing as __tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// The configuration cannot be applied.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Open an `info` span for work on one channel.
///
/// ```rust,ignore
/// let span = channel_span!("fund", id, participant = %addr);
/// ```
#[macro_export]
macro_rules! channel_span {
    ($name:literal, $channel:expr) => {
        $crate::__tracing::info_span!($name, channel = %$channel)
    };
    ($name:literal, $channel:expr, $($field:tt)+) => {
        $crate::__tracing::info_span!($name, channel = %$channel, $($field)+)
    };
}

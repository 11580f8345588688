//! Dispatcher configuration from environment variables.

use std::env;

/// Default receiver queue capacity.
pub const DEFAULT_RECEIVER_CAPACITY: usize = 16;

/// Configuration for peers and receivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Bounded queue size of each receiver. A full queue blocks dispatch.
    pub receiver_capacity: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            receiver_capacity: DEFAULT_RECEIVER_CAPACITY,
        }
    }
}

impl DispatchConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SC_RECEIVER_CAPACITY`: Receiver queue size (default: 16, minimum 1)
    pub fn from_env() -> Self {
        Self {
            receiver_capacity: env::var("SC_RECEIVER_CAPACITY")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_RECEIVER_CAPACITY),
        }
    }
}

//! Funder configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default interval between ledger polls while awaiting funding.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Funder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunderConfig {
    /// Interval between ledger polls in `await_funded`.
    pub poll_interval: Duration,
}

impl Default for FunderConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl FunderConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SC_FUNDING_POLL_MS`: Poll interval in milliseconds (default: 50)
    pub fn from_env() -> Self {
        Self {
            poll_interval: env::var("SC_FUNDING_POLL_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|&ms| ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_POLL_INTERVAL),
        }
    }
}

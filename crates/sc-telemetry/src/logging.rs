//! Global `tracing` subscriber setup.

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber described by `config`.
///
/// Returns `Ok(false)` when a global subscriber was already installed, so
/// every binary and test may call this unconditionally.
pub fn init_logging(config: &TelemetryConfig) -> Result<bool, TelemetryError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("log level {:?}: {}", config.log_level, e)))?;

    let installed = tracing_subscriber::registry()
        .with(output_layer(config))
        .with(env_filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            service = %config.service_name,
            json = config.json_logs,
            filter = %config.log_level,
            "logging initialized"
        );
    } else {
        tracing::debug!("global subscriber already installed");
    }
    Ok(installed)
}

fn output_layer(config: &TelemetryConfig) -> Option<BoxedLayer> {
    if !config.console_output {
        return None;
    }

    if config.json_logs {
        // JSON output for containers/production
        Some(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        )
    } else {
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(true)
                .boxed(),
        )
    }
}

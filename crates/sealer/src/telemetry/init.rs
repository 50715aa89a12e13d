//! Tracing subscriber initialisation.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Initialise the global tracing subscriber.
///
/// Events are written to stderr so that nothing but command output reaches
/// stdout. `RUST_LOG`, when set, overrides `log_level`.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init_telemetry(log_level: &str, format: LogFormat) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}

//! Process-wide `tracing` setup shared by the snip binaries.

use thiserror::Error;
use tracing::subscriber::{set_global_default, SetGlobalDefaultError};
use tracing_log::log::SetLoggerError;
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines, for terminals.
    #[default]
    Text,
    /// One JSON object per event, for log shippers.
    Json,
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to bridge `log` records into tracing: {0}")]
    LogBridge(#[from] SetLoggerError),
    #[error("a global tracing subscriber is already installed: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Builds the env filter from `RUST_LOG`, falling back to `default_filter`.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Installs the global subscriber and routes `log` records through it.
///
/// Must be called once, before the first event is emitted.
pub fn init(format: LogFormat) -> Result<(), TelemetryError> {
    LogTracer::init()?;

    let filter = env_filter(DEFAULT_FILTER);
    match format {
        LogFormat::Text => set_global_default(
            Registry::default()
                .with(filter)
                .with(fmt::layer().with_target(true)),
        )?,
        LogFormat::Json => set_global_default(
            Registry::default()
                .with(filter)
                .with(fmt::layer().json().flatten_event(true)),
        )?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_is_text() {
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }
}

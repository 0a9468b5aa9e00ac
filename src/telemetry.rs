//! Tracing subscriber setup for the CLI

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Filter used when neither RUST_LOG nor the config sets one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}'")]
    InvalidFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("failed to install log subscriber: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Build the filter: RUST_LOG wins, then `log_level`, then [`DEFAULT_LOG_LEVEL`]
pub fn build_filter(log_level: Option<&str>) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let value = log_level.unwrap_or(DEFAULT_LOG_LEVEL);
    EnvFilter::try_new(value).map_err(|source| TelemetryError::InvalidFilter {
        value: value.to_string(),
        source,
    })
}

/// Install the global subscriber, logging compactly to stderr
pub fn init(log_level: Option<&str>) -> Result<(), TelemetryError> {
    let env_filter = build_filter(log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| TelemetryError::Subscriber(e.into()))
}

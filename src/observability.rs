//! Logging subscriber initialisation.

use std::io;

use clap::ValueEnum;
use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Registry,
    filter::ParseError,
    layer::{Layer, SubscriberExt},
    util::{SubscriberInitExt, TryInitError},
};

use crate::config::{LogFormat, LoggingConfig};

const QUIET_DEPENDENCIES: &str = "h2=warn,hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn";

/// Errors from setting up logging.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// The log format is not one of the supported names.
    #[error("unsupported log format `{0}`, expected compact or json")]
    LogFormat(String),

    /// The log level could not be parsed as filter directives.
    #[error("invalid log level")]
    Filter(#[from] ParseError),

    /// A global subscriber was already installed.
    #[error("failed to initialize tracing subscriber")]
    Subscriber(#[from] TryInitError),
}

/// Install the global tracing subscriber. Output goes to stderr.
///
/// `--log-level` wins over `RUST_LOG`; clap resolves that before this runs.
///
/// # Errors
///
/// Returns an error if the format or level is invalid, or if a global
/// subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<(), ObservabilityError> {
    let filter = build_env_filter(config)?;

    match parse_format(&config.log_format)? {
        LogFormat::Compact => init_with_layer(
            filter,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(io::stderr),
        ),
        LogFormat::Json => init_with_layer(
            filter,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true)
                .with_writer(io::stderr),
        ),
    }
}

fn parse_format(raw: &str) -> Result<LogFormat, ObservabilityError> {
    LogFormat::from_str(raw.trim(), true)
        .map_err(|_| ObservabilityError::LogFormat(raw.to_string()))
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ObservabilityError> {
    // User directives come last so they can override the pinned targets.
    let directives = format!("{QUIET_DEPENDENCIES},{}", config.log_level);

    Ok(EnvFilter::try_new(directives)?)
}

fn init_with_layer<L>(filter: EnvFilter, fmt_layer: L) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()?;

    Ok(())
}

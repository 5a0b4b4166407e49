//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, ConfigResult, LogFormat, LoggingConfig};

/// Install the global subscriber.
///
/// `RUST_LOG`, when set, takes precedence over the configured level. Output
/// goes to stderr so `invoke` can keep stdout for the response.
pub fn init_logging(config: &LoggingConfig) -> ConfigResult<()> {
    let filter = build_filter(config)?;

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .try_init(),
    };

    result.map_err(|e| ConfigError::Invalid {
        key: "LOG_LEVEL",
        message: format!("logging already initialized: {}", e),
    })
}

fn build_filter(config: &LoggingConfig) -> ConfigResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(config.level.trim()).map_err(|e| ConfigError::Invalid {
        key: "LOG_LEVEL",
        message: e.to_string(),
    })
}

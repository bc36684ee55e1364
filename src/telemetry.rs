//! Tracing subscriber setup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Environment variable that overrides the configured filter directive.
pub const LOG_ENV_VAR: &str = "FOUNDER_COMPASS_LOG";

#[derive(Debug, Error)]
#[error("failed to initialize tracing subscriber: {0}")]
pub struct TelemetryError(String);

/// Installs the global subscriber. Logs go to stderr so they never mix with
/// the interactive prompts on stdout.
///
/// # Errors
///
/// Fails if the filter is invalid or a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = resolve_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|error| TelemetryError(error.to_string()))
}

fn resolve_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| TelemetryError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configured_filter_is_an_error() {
        if std::env::var(LOG_ENV_VAR).is_ok() {
            return;
        }
        let config = LoggingConfig {
            filter: "founder_compass=loud".to_string(),
            json: false,
        };
        assert!(resolve_filter(&config).is_err());
    }

    #[test]
    fn default_filter_resolves() {
        assert!(resolve_filter(&LoggingConfig::default()).is_ok());
    }
}

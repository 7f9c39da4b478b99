// Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::{ConfigError, LogFormat, LoggingSettings};

/// Install the global subscriber. `RUST_LOG` overrides the configured
/// level. Fails if a subscriber is already installed.
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level).map_err(|e| ConfigError::Validation {
            field: "logging.level".into(),
            reason: e.to_string(),
        })?,
    };

    let installed = match settings.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init(),
    };
    installed.map_err(|e| ConfigError::Logging(e.to_string()))
}

//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over the configured filter when set.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;
use crate::error::{ServiceError, ServiceResult};

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_tracing(settings: &LoggingSettings) -> ServiceResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .map_err(|e| ServiceError::Config(format!("invalid log filter: {e}")))?;

    let installed = if settings.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
    };

    installed.map_err(|e| ServiceError::Config(format!("tracing already initialized: {e}")))
}

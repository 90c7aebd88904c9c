//! Process-wide `tracing` subscriber setup.

use crate::config::{ConfigError, HarnessConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter built from `config.log_level` alone. `RUST_LOG` only reaches it
/// through [`HarnessConfig::from_env`], so callers that override the level
/// keep the last word.
fn env_filter(config: &HarnessConfig) -> Result<EnvFilter, ConfigError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| ConfigError::InvalidLogFilter {
        filter: config.log_level.clone(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber.
///
/// Logs go to stderr; stdout belongs to the fuzzing engine. Returns
/// `Ok(false)` when a subscriber was already installed, so repeated calls
/// are harmless.
pub fn init_logging(config: &HarnessConfig) -> Result<bool, ConfigError> {
    let env_filter = env_filter(config)?;

    let installed = if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .is_ok()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_ansi(false);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::debug!(
            log_level = %config.log_level,
            json_logs = config.json_logs,
            "logging initialized"
        );
    }
    Ok(installed)
}

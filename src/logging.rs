// ABOUTME: tracing-subscriber initialisation driven by LoggingConfig
// ABOUTME: RUST_LOG takes precedence over the configured level

use anyhow::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install a global fmt subscriber. A subscriber that is already installed
/// stays in place, so repeated calls are harmless.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let installed = match config.format.as_str() {
        "compact" => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(env_filter)
            .with_target(false)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .try_init(),
    };
    match installed {
        Ok(()) => debug!("Logging initialized with level: {}", config.level),
        Err(e) => debug!("Keeping existing global subscriber: {}", e),
    }
    Ok(())
}

//! Logging infrastructure.
//!
//! Structured logging via tracing and tracing-subscriber with json or
//! pretty stdout output and an env-filter default taken from config.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::domain::models::LoggingConfig;

/// Initialize the global tracing subscriber from configuration.
///
/// Safe to call more than once: subsequent calls are no-ops, which keeps
/// test binaries from panicking on double initialization.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let default_level = parse_log_level(&config.level)?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let result = match config.format.as_str() {
        "pretty" => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(env_filter)
            .with_target(true)
            .try_init(),
        _ => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_current_span(true)
            .with_target(true)
            .try_init(),
    };

    // Already-set subscriber is fine
    let _ = result;

    tracing::debug!(level = %config.level, format = %config.format, "logger initialized");
    Ok(())
}

/// Parse a log level string to a tracing `Level`.
fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {level}"),
    }
}

//! Hierarchical configuration loading.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Attempt budget must allow at least one attempt.
    #[error("invalid max_attempts: {0}. Must be at least 1")]
    InvalidMaxAttempts(u32),

    /// Provider timeout must be positive.
    #[error("invalid provider_timeout_secs: {0}. Must be positive")]
    InvalidProviderTimeout(u64),

    /// Base temperature must sit in (0, 1].
    #[error("invalid base temperature: {0}. Must be in (0, 1]")]
    InvalidBaseTemperature(f64),

    /// Engine depth must be positive.
    #[error("invalid engine depth: {0}. Must be at least 1")]
    InvalidEngineDepth(u32),

    /// Engine path cannot be empty.
    #[error("engine path cannot be empty")]
    EmptyEnginePath,

    /// Bedrock base URL cannot be empty.
    #[error("bedrock base_url cannot be empty")]
    EmptyBaseUrl,

    /// Unsupported log level.
    #[error("invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unsupported log format.
    #[error("invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `gambit.yaml` in the working directory
    /// 3. Environment variables (`GAMBIT_*` prefix, `__` separators)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("gambit.yaml"))
            .merge(Env::prefixed("GAMBIT_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let policy = config.policy.resolve();
        if policy.max_attempts == 0 {
            return Err(ConfigError::InvalidMaxAttempts(policy.max_attempts));
        }
        if config.policy.provider_timeout_secs == 0 {
            return Err(ConfigError::InvalidProviderTimeout(
                config.policy.provider_timeout_secs,
            ));
        }

        if config.escalation.base <= 0.0 || config.escalation.base > 1.0 {
            return Err(ConfigError::InvalidBaseTemperature(config.escalation.base));
        }

        if config.engine.depth == 0 {
            return Err(ConfigError::InvalidEngineDepth(config.engine.depth));
        }
        if config.engine.path.is_empty() {
            return Err(ConfigError::EmptyEnginePath);
        }

        if config.bedrock.base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

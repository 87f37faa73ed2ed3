//! Configuration model for the move-acquisition core.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::sampling::EscalationPolicy;

/// Model id used for fallback-move justifications in the synchronous
/// profile, where justification is divorced from move generation.
pub const DEFAULT_JUSTIFIER_MODEL: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

/// Main configuration structure for gambit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Bedrock runtime endpoint configuration.
    #[serde(default)]
    pub bedrock: BedrockConfig,

    /// Deterministic fallback engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Retry/fallback policy configuration.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Temperature escalation constants.
    #[serde(default)]
    pub escalation: EscalationPolicy,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Bedrock runtime endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BedrockConfig {
    /// Base URL of the Bedrock runtime API for the bound region.
    #[serde(default = "default_bedrock_base_url")]
    pub base_url: String,

    /// Bearer token for the runtime API. Falls back to the
    /// `AWS_BEARER_TOKEN_BEDROCK` environment variable when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_bedrock_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_bedrock_base_url() -> String {
    "https://bedrock-runtime.us-east-1.amazonaws.com".to_string()
}

const fn default_bedrock_timeout_secs() -> u64 {
    60
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            base_url: default_bedrock_base_url(),
            api_key: None,
            timeout_secs: default_bedrock_timeout_secs(),
        }
    }
}

/// Deterministic fallback engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Path to the UCI engine executable.
    #[serde(default = "default_engine_path")]
    pub path: String,

    /// Search depth for best-move queries.
    #[serde(default = "default_engine_depth")]
    pub depth: u32,

    /// Overall timeout for one best-move query in seconds.
    #[serde(default = "default_engine_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_engine_path() -> String {
    "/opt/bin/stockfish".to_string()
}

const fn default_engine_depth() -> u32 {
    12
}

const fn default_engine_timeout_secs() -> u64 {
    30
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: default_engine_path(),
            depth: default_engine_depth(),
            timeout_secs: default_engine_timeout_secs(),
        }
    }
}

/// Which acquisition policy profile to run.
///
/// The two profiles mirror the two observed flows: the synchronous flow
/// tries 3 times and sources fallback justifications from a fixed default
/// model, the imported-model flow tries 5 times and reuses the moving model
/// for justifications. They are deliberately kept as separate profiles
/// rather than unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyProfile {
    /// 3 attempts, fallback justification from the default model.
    Synchronous,
    /// 5 attempts, justification from the same model that moves.
    Imported,
}

/// Retry/fallback policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PolicyConfig {
    /// Profile to start from.
    #[serde(default = "default_profile")]
    pub profile: PolicyProfile,

    /// Override for the attempt budget; profile default when unset.
    #[serde(default)]
    pub max_attempts: Option<u32>,

    /// Override for the justifier model id; profile default when unset.
    #[serde(default)]
    pub justifier_model: Option<String>,

    /// Per-provider-call timeout in seconds. Kept shorter than the overall
    /// invocation budget so a hung provider consumes one attempt, not the
    /// whole call.
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,
}

const fn default_profile() -> PolicyProfile {
    PolicyProfile::Synchronous
}

const fn default_provider_timeout_secs() -> u64 {
    30
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            max_attempts: None,
            justifier_model: None,
            provider_timeout_secs: default_provider_timeout_secs(),
        }
    }
}

impl PolicyConfig {
    /// Resolve the configured profile and overrides into a concrete policy.
    pub fn resolve(&self) -> AcquisitionPolicy {
        let mut policy = match self.profile {
            PolicyProfile::Synchronous => AcquisitionPolicy::synchronous(),
            PolicyProfile::Imported => AcquisitionPolicy::imported(),
        };
        if let Some(n) = self.max_attempts {
            policy.max_attempts = n;
        }
        if let Some(ref model) = self.justifier_model {
            policy.justifier_model = Some(model.clone());
        }
        policy.provider_timeout = Duration::from_secs(self.provider_timeout_secs);
        policy
    }
}

/// Concrete acquisition policy driving the retry state machine.
#[derive(Debug, Clone)]
pub struct AcquisitionPolicy {
    /// Attempt budget `N`. The engine performs exactly `N` provider
    /// attempts before falling back.
    pub max_attempts: u32,

    /// Model used to justify fallback moves; `None` reuses the model that
    /// was asked to move.
    pub justifier_model: Option<String>,

    /// Per-provider-call timeout.
    pub provider_timeout: Duration,
}

impl AcquisitionPolicy {
    /// The synchronous-move profile.
    pub fn synchronous() -> Self {
        Self {
            max_attempts: 3,
            justifier_model: Some(DEFAULT_JUSTIFIER_MODEL.to_string()),
            provider_timeout: Duration::from_secs(default_provider_timeout_secs()),
        }
    }

    /// The imported-model profile.
    pub fn imported() -> Self {
        Self {
            max_attempts: 5,
            justifier_model: None,
            provider_timeout: Duration::from_secs(default_provider_timeout_secs()),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

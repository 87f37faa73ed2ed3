//! Model provider port.
//!
//! Abstracts the per-backend "generate text" capability so the acquisition
//! engine is schema-agnostic: each adapter hides its family's request and
//! response JSON and returns the completion text plus the opaque body.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::models::SamplingConfig;

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The querying side.
    User,
    /// The model side.
    Assistant,
}

/// One turn in a reconstructed conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Turn author.
    pub role: Role,
    /// Turn text; empty for placeholder assistant turns.
    pub text: String,
}

/// Reconstruct a conversation from a flat comment history and append the
/// new user prompt.
///
/// Turns alternate by parity of position: even index = user, odd =
/// assistant. Conversational backends reject requests that do not strictly
/// alternate and terminate with a user turn, so if the history ends on a
/// user turn an empty assistant placeholder is inserted before the new
/// prompt is appended. This is a structural contract of those backends.
pub fn conversation(history: &[String], prompt: String) -> Vec<Turn> {
    let mut turns: Vec<Turn> = history
        .iter()
        .enumerate()
        .map(|(i, text)| Turn {
            role: if i % 2 == 0 { Role::User } else { Role::Assistant },
            text: text.clone(),
        })
        .collect();

    if turns.last().is_some_and(|turn| turn.role == Role::User) {
        turns.push(Turn {
            role: Role::Assistant,
            text: String::new(),
        });
    }

    turns.push(Turn {
        role: Role::User,
        text: prompt,
    });
    turns
}

/// Request for one text generation.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Correlation id threaded through tracing spans.
    pub request_id: Uuid,

    /// Fully-qualified model identifier (e.g.
    /// `anthropic.claude-3-sonnet-20240229-v1:0`).
    pub model_id: String,

    /// Rendered instruction prompt.
    pub prompt: String,

    /// Optional system prompt, for schemas that carry one.
    pub system: Option<String>,

    /// Prior conversation turns, oldest first. Single-shot adapters
    /// ignore this.
    pub history: Vec<String>,

    /// Sampling parameters for this attempt.
    pub sampling: SamplingConfig,
}

impl GenerateRequest {
    /// A single-shot request with no system prompt or history.
    pub fn new(model_id: impl Into<String>, prompt: impl Into<String>, sampling: SamplingConfig) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            model_id: model_id.into(),
            prompt: prompt.into(),
            system: None,
            history: Vec::new(),
            sampling,
        }
    }
}

/// A provider completion: extracted text plus the opaque response body.
///
/// The adapter only translates schema. If the body does not contain the
/// expected completion field, `text` is empty and the parser downstream
/// treats the attempt as noncompliant — that is not an adapter error.
#[derive(Debug, Clone)]
pub struct RawCompletion {
    /// Completion text extracted from the family's response schema.
    pub text: String,

    /// The raw response body, preserved for the attempt log.
    pub body: serde_json::Value,
}

/// Hard failures surfaced by a provider adapter.
///
/// These are propagated to the orchestrator unretried; retrying is the
/// acquisition state machine's job, and each failure consumes exactly one
/// attempt there.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network-level failure reaching the backend.
    #[error("transport error: {0}")]
    Transport(String),

    /// Authentication or authorization rejection.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Backend throttled the request.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The response body was not parseable JSON at all.
    #[error("malformed response body: {0}")]
    MalformedBody(String),

    /// The call exceeded the per-attempt timeout.
    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),
}

/// Port trait for model provider adapters.
///
/// Implementations must be `Send + Sync`; the engine holds them behind
/// `Arc<dyn ModelProvider>` resolved from the registry.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Vendor prefix this adapter serves (`amazon`, `anthropic`, …).
    fn family(&self) -> &'static str;

    /// Execute one generation against the backend.
    async fn generate(&self, request: &GenerateRequest) -> Result<RawCompletion, ProviderError>;

    /// Whether this adapter folds conversation history into its requests.
    fn supports_history(&self) -> bool {
        false
    }
}

/// A provider id whose vendor prefix matches no registered adapter.
///
/// This is a configuration error: it is fatal and never consumes an
/// attempt.
#[derive(Debug, Error)]
#[error("unsupported provider id '{model_id}'")]
pub struct UnknownProviderError {
    /// The unmatched identifier.
    pub model_id: String,
}

/// Routes a provider id to its adapter by vendor-prefix match.
pub trait ProviderRouter: Send + Sync {
    /// Resolve the adapter for a model id, failing fast on unknown
    /// prefixes.
    fn resolve(&self, model_id: &str) -> Result<Arc<dyn ModelProvider>, UnknownProviderError>;
}

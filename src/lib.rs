//! Gambit - LLM-driven chess move acquisition
//!
//! Gambit drives an automated chess game in which each side's move is
//! produced by a selectable LLM backend. The hard problem is reliable move
//! acquisition: given an occasionally malformed, occasionally illegal
//! completion from one of several heterogeneous model families, produce a
//! legal move and a human-readable justification within a bounded number of
//! attempts, with a deterministic always-legal engine fallback when the
//! models fail.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Position/attempt/result models, the
//!   sampling escalation policy, and the port traits.
//! - **Service Layer** (`services`): The acquisition state machine, prompt
//!   templates, response parsing and justification synthesis.
//! - **Infrastructure Layer** (`infrastructure`): Bedrock runtime client
//!   with one adapter per backend family, the UCI engine adapter,
//!   configuration and logging.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use gambit::domain::models::{Config, MoveRequest};
//! use gambit::domain::ports::NullCommentSink;
//! use gambit::infrastructure::bedrock::ProviderRegistry;
//! use gambit::infrastructure::uci::UciEngine;
//! use gambit::services::MoveAcquisitionEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = gambit::infrastructure::config::ConfigLoader::load()?;
//!     let engine = MoveAcquisitionEngine::new(
//!         Arc::new(ProviderRegistry::from_config(&config.bedrock)?),
//!         Arc::new(UciEngine::new(config.engine.clone())),
//!         Arc::new(NullCommentSink),
//!         config.policy.resolve(),
//!         config.escalation,
//!     );
//!     let request = MoveRequest::new(
//!         "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
//!         None,
//!         "anthropic.claude-3-sonnet-20240229-v1:0",
//!         "session-1",
//!     );
//!     let result = engine.acquire(request).await?;
//!     println!("{} ({:?})", result.mv, result.source);
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::error::AcquisitionError;
pub use domain::models::{
    AcquisitionPolicy, AttemptRecord, Config, EscalationPolicy, MoveCandidate, MoveRequest,
    MoveResult, MoveSource, PolicyProfile, Position, SamplingConfig,
};
pub use domain::ports::{
    BestMoveEngine, CommentSink, GenerateRequest, ModelProvider, NullCommentSink, ProviderError,
    ProviderRouter, RawCompletion,
};
pub use infrastructure::bedrock::ProviderRegistry;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::uci::UciEngine;
pub use services::{JustificationSynthesizer, MoveAcquisitionEngine};

//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the async trait interfaces that infrastructure
//! adapters must implement:
//! - `ModelProvider` / `ProviderRouter`: text generation per backend family
//! - `BestMoveEngine`: deterministic best-move queries
//! - `CommentSink`: justification comment delivery
//!
//! These traits keep the acquisition engine independent of any specific
//! backend, engine binary, or delivery channel.

pub mod comment_sink;
pub mod engine;
pub mod provider;

pub use comment_sink::{CommentSink, NullCommentSink, SinkError};
pub use engine::{BestMoveEngine, EngineError};
pub use provider::{
    conversation, GenerateRequest, ModelProvider, ProviderError, ProviderRouter, RawCompletion,
    Role, Turn, UnknownProviderError,
};

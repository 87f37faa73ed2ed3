//! Fatal error taxonomy for move acquisition.
//!
//! Non-fatal conditions (malformed output, illegal moves, provider
//! transport failures, timeouts) never appear here: the acquisition engine
//! absorbs them as consumed attempts. The caller receives either a complete
//! `MoveResult` or one of these fatal errors, never a partial result.

use thiserror::Error;

use crate::domain::models::PositionError;
use crate::domain::ports::{EngineError, SinkError, UnknownProviderError};

/// Fatal failures of one move-acquisition invocation.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// The provider id matched no registered vendor prefix. A
    /// configuration error, surfaced immediately without consuming an
    /// attempt.
    #[error(transparent)]
    UnknownProvider(#[from] UnknownProviderError),

    /// The supplied game state could not be reconstructed.
    #[error(transparent)]
    InvalidPosition(#[from] PositionError),

    /// The deterministic fallback engine failed. There is no further
    /// fallback behind it.
    #[error("fallback engine failed: {0}")]
    FallbackEngine(#[from] EngineError),

    /// The fallback engine returned a move the position rejects. Should
    /// not happen for a conforming engine; surfaced rather than swallowed.
    #[error("fallback engine produced an unplayable move: {0}")]
    FallbackMoveRejected(String),

    /// Comment delivery failed.
    #[error(transparent)]
    Notification(#[from] SinkError),

    /// The Q&A variant's single provider call failed. Unlike move
    /// acquisition there is no retry budget or fallback behind it.
    #[error("question answering failed: {0}")]
    Question(#[from] crate::domain::ports::ProviderError),
}

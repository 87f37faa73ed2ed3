//! Deterministic fallback engine port.
//!
//! The correctness backstop for the whole system: when the model path is
//! exhausted this capability must produce a legal move for any non-terminal
//! position, and a failure here is fatal, never swallowed.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::Position;

/// Errors from the fallback engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Process spawn or pipe I/O failure talking to the engine.
    #[error("engine I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Engine executable was not found at the configured path.
    #[error("engine not found at path: {0}")]
    NotFound(String),

    /// The UCI handshake did not complete.
    #[error("engine initialization failed: {0}")]
    InitFailed(String),

    /// Engine returned an invalid or unexpected response.
    #[error("invalid engine response: {0}")]
    InvalidResponse(String),

    /// The best-move query exceeded its time budget.
    #[error("engine timed out after {0}s")]
    Timeout(u64),
}

/// Port trait for the deterministic best-move capability.
#[async_trait]
pub trait BestMoveEngine: Send + Sync {
    /// Return the engine's best move for the position, in UCI notation.
    async fn best_move(&self, position: &Position) -> Result<String, EngineError>;
}

//! Comment/notification sink port.
//!
//! The acquisition engine publishes each justification as a game comment
//! through this port; the actual delivery channel (GraphQL mutation, queue,
//! …) is an external collaborator.

use async_trait::async_trait;
use thiserror::Error;

/// Delivery failure from the comment sink.
#[derive(Debug, Error)]
#[error("comment delivery failed: {0}")]
pub struct SinkError(pub String);

/// Port trait for publishing justification comments.
#[async_trait]
pub trait CommentSink: Send + Sync {
    /// Publish one comment for a session. `author` is the
    /// `{model_id}#{side}` tag of the commenting player.
    async fn publish(&self, session_id: &str, comment: &str, author: &str) -> Result<(), SinkError>;
}

/// Sink that drops every comment. Useful for tests and for callers that
/// handle delivery themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCommentSink;

#[async_trait]
impl CommentSink for NullCommentSink {
    async fn publish(&self, _session_id: &str, _comment: &str, _author: &str) -> Result<(), SinkError> {
        Ok(())
    }
}

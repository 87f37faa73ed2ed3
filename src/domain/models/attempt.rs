//! Value objects produced by the move-acquisition loop.

use serde::{Deserialize, Serialize};

/// One provider attempt, recorded whether or not it produced a legal move.
///
/// Records are append-only: the loop threads the attempt sequence by value
/// and never mutates a record after it is pushed. The full sequence is
/// returned to the caller for observability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// The exact prompt sent to the provider.
    pub prompt: String,

    /// Opaque provider response body. For transport failures this is an
    /// `{"error": …}` object so log consumers can tell "provider failed"
    /// apart from "provider complied but the move was illegal".
    pub raw_response: serde_json::Value,

    /// Zero-based attempt index.
    pub index: u32,
}

/// Parser output for one raw completion.
///
/// `None` fields are the normal representation of "the model did not comply
/// with the output contract" — an expected state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveCandidate {
    /// The SAN move text, if a `<move>` span was found.
    pub san: Option<String>,

    /// The justification text, if one could be extracted.
    pub justification: Option<String>,
}

/// Which path produced the final move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoveSource {
    /// A provider attempt produced a legal move within budget.
    Model,
    /// The deterministic engine supplied the move after budget exhaustion.
    Fallback,
}

/// Input to one move-acquisition invocation.
///
/// The position is reconstructed fresh from the external game store for
/// every invocation; nothing here outlives the call.
#[derive(Debug, Clone)]
pub struct MoveRequest {
    /// Current position FEN.
    pub fen: String,

    /// Accumulated SAN history in the wire format, if any.
    pub san_history: Option<String>,

    /// Provider/model identifier for the side to move. The vendor prefix
    /// (`amazon`, `anthropic`, `ai21`, `cohere`, `meta`, `mistral`)
    /// selects the adapter.
    pub model_id: String,

    /// Game session identifier, used when publishing comments.
    pub session_id: String,

    /// Optional question for the Q&A variant; folded into the prompt by
    /// the conversational adapters.
    pub question: Option<String>,

    /// Prior conversation turns for the Q&A variant, oldest first.
    pub history: Vec<String>,
}

impl MoveRequest {
    /// A plain move request with no conversational context.
    pub fn new(
        fen: impl Into<String>,
        san_history: Option<String>,
        model_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            fen: fen.into(),
            san_history,
            model_id: model_id.into(),
            session_id: session_id.into(),
            question: None,
            history: Vec::new(),
        }
    }
}

/// Terminal output of the acquisition engine. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResult {
    /// The accepted move in SAN. Serialized as `move`, which Rust reserves.
    #[serde(rename = "move")]
    pub mv: String,

    /// Human-readable justification for the move.
    pub justification: String,

    /// FEN of the successor position.
    pub next_fen: String,

    /// SAN history of the successor position in the wire format.
    pub next_san_history: String,

    /// Every attempt made, in order, including the successful one on the
    /// model path. Fallback results carry the full exhausted sequence.
    pub attempts: Vec<AttemptRecord>,

    /// Which path produced the move.
    pub source: MoveSource,
}

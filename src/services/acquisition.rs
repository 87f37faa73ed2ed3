//! The move-acquisition engine: retry, escalation, fallback.
//!
//! An explicit state machine drives each invocation. `Attempting(i)` builds
//! the prompt, calls the provider under a bounded timeout, parses the
//! response and checks legality against the unmodified position. Every
//! attempt appends exactly one [`AttemptRecord`], threaded by value, and
//! nothing mutates the position until a candidate is confirmed legal. When
//! the budget is exhausted the deterministic engine supplies the move and a
//! justification is synthesized independently.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::error::AcquisitionError;
use crate::domain::models::{
    AcquisitionPolicy, AttemptRecord, EscalationPolicy, MoveRequest, MoveResult, MoveSource,
    Position,
};
use crate::domain::ports::{
    BestMoveEngine, CommentSink, GenerateRequest, ModelProvider, ProviderError, ProviderRouter,
};
use crate::services::justification::{JustificationSynthesizer, DEFAULT_JUSTIFICATION};
use crate::services::{prompt_builder, response_parser};

/// States of the retry/escalation machine.
///
/// `Attempting(i)` for `i` in `0..N`; both terminal states produce a
/// [`MoveResult`]. Transition data (the accepted move and its successor
/// position) rides in `Succeeded` so no step is re-validated.
#[derive(Debug)]
pub enum AcquisitionState {
    /// Performing provider attempt `i`.
    Attempting(u32),
    /// A provider attempt produced a legal move.
    Succeeded {
        /// The accepted SAN text.
        san: String,
        /// Justification extracted from the same completion.
        justification: String,
        /// Position after the accepted move.
        next: Position,
    },
    /// Budget exhausted; the deterministic engine decides.
    Fallback,
}

/// Why one attempt was rejected. Consumes the attempt, never the call.
#[derive(Debug)]
enum Rejection {
    /// Parser found no move tag.
    NoMove,
    /// Candidate parsed but the position rejected it.
    Illegal(String),
    /// Provider transport/auth failure or timeout.
    Provider(ProviderError),
}

impl Rejection {
    /// Log label distinguishing "provider failed" from "model complied but
    /// was illegal".
    fn describe(&self) -> String {
        match self {
            Self::NoMove => "no move tag in response".to_string(),
            Self::Illegal(reason) => format!("illegal move: {reason}"),
            Self::Provider(err) => format!("provider failure: {err}"),
        }
    }
}

/// Orchestrates prompt dispatch, validation, retry and fallback for one
/// move.
pub struct MoveAcquisitionEngine {
    providers: Arc<dyn ProviderRouter>,
    fallback: Arc<dyn BestMoveEngine>,
    comments: Arc<dyn CommentSink>,
    justifier: JustificationSynthesizer,
    policy: AcquisitionPolicy,
    escalation: EscalationPolicy,
}

impl MoveAcquisitionEngine {
    /// Assemble the engine from its collaborators.
    pub fn new(
        providers: Arc<dyn ProviderRouter>,
        fallback: Arc<dyn BestMoveEngine>,
        comments: Arc<dyn CommentSink>,
        policy: AcquisitionPolicy,
        escalation: EscalationPolicy,
    ) -> Self {
        Self {
            justifier: JustificationSynthesizer::new(Arc::clone(&providers)),
            providers,
            fallback,
            comments,
            policy,
            escalation,
        }
    }

    /// Acquire one legal move for the request's position.
    ///
    /// Returns a complete [`MoveResult`] or a fatal error — never a
    /// partial result. All non-fatal conditions are absorbed as consumed
    /// attempts.
    #[instrument(
        skip(self, request),
        fields(session_id = %request.session_id, model_id = %request.model_id)
    )]
    pub async fn acquire(&self, request: MoveRequest) -> Result<MoveResult, AcquisitionError> {
        let position = Position::from_fen(&request.fen, request.san_history.as_deref())?;
        let provider = self.providers.resolve(&request.model_id)?;
        let request_id = Uuid::new_v4();

        let budget = self.policy.max_attempts.max(1);
        let mut attempts: Vec<AttemptRecord> = Vec::new();
        let mut state = AcquisitionState::Attempting(0);

        loop {
            state = match state {
                AcquisitionState::Attempting(i) => {
                    let (record, outcome) = self
                        .run_attempt(provider.as_ref(), &request, &position, request_id, i)
                        .await;
                    attempts.push(record);

                    match outcome {
                        Ok(next_state) => next_state,
                        Err(rejection) => {
                            warn!(attempt = i, reason = %rejection.describe(), "attempt rejected");
                            if i + 1 < budget {
                                AcquisitionState::Attempting(i + 1)
                            } else {
                                AcquisitionState::Fallback
                            }
                        }
                    }
                }
                AcquisitionState::Succeeded {
                    san,
                    justification,
                    next,
                } => {
                    info!(attempts = attempts.len(), mv = %san, "model produced a legal move");
                    break self
                        .finish(&request, &position, next, san, justification, attempts, MoveSource::Model)
                        .await;
                }
                AcquisitionState::Fallback => {
                    info!(attempts = attempts.len(), "attempt budget exhausted, deferring to engine");
                    break self.finish_fallback(&request, &position, attempts).await;
                }
            };
        }
    }

    /// Answer a question about the current game via the selected provider.
    ///
    /// Single-shot: one provider call, no retry budget, no fallback. Prior
    /// comments ride along as conversation history for the adapters that
    /// support it.
    #[instrument(skip(self, request, question), fields(model_id = %request.model_id))]
    pub async fn answer_question(
        &self,
        request: &MoveRequest,
        question: &str,
    ) -> Result<String, AcquisitionError> {
        let position = Position::from_fen(&request.fen, request.san_history.as_deref())?;
        let provider = self.providers.resolve(&request.model_id)?;

        let mut generate = GenerateRequest::new(
            &request.model_id,
            prompt_builder::question_prompt(&position, question),
            self.escalation.sampling_for(0, 200),
        );
        generate.history = request.history.clone();

        let completion = tokio::time::timeout(self.policy.provider_timeout, provider.generate(&generate))
            .await
            .map_err(|_| ProviderError::Timeout(self.policy.provider_timeout))??;

        Ok(completion.text.trim().to_string())
    }

    /// Run one provider attempt. Always yields exactly one record; the
    /// outcome is either the next (terminal) state or a rejection.
    async fn run_attempt(
        &self,
        provider: &dyn ModelProvider,
        request: &MoveRequest,
        position: &Position,
        request_id: Uuid,
        index: u32,
    ) -> (AttemptRecord, Result<AcquisitionState, Rejection>) {
        let prompt = prompt_builder::move_prompt(position);
        let sampling = self.escalation.sampling_for(index, 200);
        debug!(attempt = index, temperature = sampling.temperature, "invoking provider");

        let mut generate = GenerateRequest::new(&request.model_id, prompt.clone(), sampling);
        generate.request_id = request_id;
        generate.history = request.history.clone();

        let completion =
            match tokio::time::timeout(self.policy.provider_timeout, provider.generate(&generate))
                .await
            {
                Err(_) => {
                    let err = ProviderError::Timeout(self.policy.provider_timeout);
                    let record = AttemptRecord {
                        prompt,
                        raw_response: json!({ "error": err.to_string() }),
                        index,
                    };
                    return (record, Err(Rejection::Provider(err)));
                }
                Ok(Err(err)) => {
                    let record = AttemptRecord {
                        prompt,
                        raw_response: json!({ "error": err.to_string() }),
                        index,
                    };
                    return (record, Err(Rejection::Provider(err)));
                }
                Ok(Ok(completion)) => completion,
            };

        let record = AttemptRecord {
            prompt,
            raw_response: completion.body.clone(),
            index,
        };

        let candidate = response_parser::parse(&completion.text);
        let Some(san) = candidate.san else {
            return (record, Err(Rejection::NoMove));
        };

        match position.apply_san(&san) {
            Ok(next) => {
                let justification = candidate
                    .justification
                    .or_else(|| response_parser::whole_text_justification(&completion.text))
                    .unwrap_or_else(|| DEFAULT_JUSTIFICATION.to_string());
                (
                    record,
                    Ok(AcquisitionState::Succeeded {
                        san,
                        justification,
                        next,
                    }),
                )
            }
            Err(illegal) => (record, Err(Rejection::Illegal(illegal.to_string()))),
        }
    }

    /// Fallback path: deterministic best move plus an independently
    /// synthesized justification.
    async fn finish_fallback(
        &self,
        request: &MoveRequest,
        position: &Position,
        attempts: Vec<AttemptRecord>,
    ) -> Result<MoveResult, AcquisitionError> {
        let uci = self.fallback.best_move(position).await?;
        let (next, san) = position
            .apply_uci(&uci)
            .map_err(|e| AcquisitionError::FallbackMoveRejected(e.to_string()))?;
        info!(mv = %san, "engine supplied fallback move");

        // The imported profile reuses the moving model and prefixes the
        // comment with the side it helped; the synchronous profile uses a
        // fixed justifier model with no prefix.
        let justification = match self.policy.justifier_model.as_deref() {
            Some(justifier) => self
                .justifier
                .synthesize(position, &san, justifier)
                .await
                .unwrap_or_else(|| DEFAULT_JUSTIFICATION.to_string()),
            None => {
                let body = self
                    .justifier
                    .synthesize(position, &san, &request.model_id)
                    .await
                    .unwrap_or_else(|| DEFAULT_JUSTIFICATION.to_string());
                format!("Helper(CMI) - {}: {}", position.side_name(), body)
            }
        };

        self.finish(request, position, next, san, justification, attempts, MoveSource::Fallback)
            .await
    }

    /// Publish the justification and assemble the terminal result.
    #[allow(clippy::too_many_arguments)]
    async fn finish(
        &self,
        request: &MoveRequest,
        position: &Position,
        next: Position,
        san: String,
        justification: String,
        attempts: Vec<AttemptRecord>,
        source: MoveSource,
    ) -> Result<MoveResult, AcquisitionError> {
        // Double quotes break the delivery channel's mutation syntax.
        let comment = justification.replace('"', "'");
        let author = format!("{}#{}", request.model_id, position.side_tag());
        self.comments
            .publish(&request.session_id, &comment, &author)
            .await?;

        Ok(MoveResult {
            mv: san,
            justification,
            next_fen: next.fen(),
            next_san_history: next.san_history(),
            attempts,
            source,
        })
    }
}

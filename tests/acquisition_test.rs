//! End-to-end tests of the acquisition state machine with injected fakes:
//! no network, no engine binary.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use gambit::domain::models::{AcquisitionPolicy, EscalationPolicy, MoveRequest, MoveSource, Position};
use gambit::domain::ports::{
    BestMoveEngine, CommentSink, EngineError, GenerateRequest, ModelProvider, ProviderError,
    ProviderRouter, RawCompletion, SinkError, UnknownProviderError,
};
use gambit::services::{MoveAcquisitionEngine, DEFAULT_JUSTIFICATION};
use gambit::AcquisitionError;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const CLAUDE: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

/// One scripted provider reply.
enum Reply {
    Text(&'static str),
    Fail(&'static str),
    Hang,
}

/// Provider that replays a script and records the sampling temperatures it
/// was called with. When the script runs dry it fails.
struct ScriptedProvider {
    script: Mutex<VecDeque<Reply>>,
    temperatures: Mutex<Vec<f64>>,
}

impl ScriptedProvider {
    fn new(script: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            temperatures: Mutex::new(Vec::new()),
        })
    }

    fn temperatures(&self) -> Vec<f64> {
        self.temperatures.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    fn family(&self) -> &'static str {
        "anthropic"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<RawCompletion, ProviderError> {
        self.temperatures
            .lock()
            .unwrap()
            .push(request.sampling.temperature);
        let reply = self.script.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Text(text)) => Ok(RawCompletion {
                text: text.to_string(),
                body: json!({ "completion": text }),
            }),
            Some(Reply::Fail(msg)) => Err(ProviderError::Transport(msg.to_string())),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                unreachable!("hung reply should be timed out")
            }
            None => Err(ProviderError::Transport("script exhausted".to_string())),
        }
    }
}

/// Router that hands every known-vendor id to one provider, mimicking the
/// registry's prefix dispatch.
struct TestRouter {
    provider: Arc<ScriptedProvider>,
}

impl ProviderRouter for TestRouter {
    fn resolve(
        &self,
        model_id: &str,
    ) -> Result<Arc<dyn ModelProvider>, UnknownProviderError> {
        const PREFIXES: [&str; 6] = ["amazon", "anthropic", "ai21", "cohere", "meta", "mistral"];
        if PREFIXES.iter().any(|p| model_id.starts_with(p)) {
            Ok(Arc::clone(&self.provider) as Arc<dyn ModelProvider>)
        } else {
            Err(UnknownProviderError {
                model_id: model_id.to_string(),
            })
        }
    }
}

/// Engine that always answers the same UCI move.
struct FixedEngine(&'static str);

#[async_trait]
impl BestMoveEngine for FixedEngine {
    async fn best_move(&self, _position: &Position) -> Result<String, EngineError> {
        Ok(self.0.to_string())
    }
}

/// Engine that fails; exercises the fatal path.
struct BrokenEngine;

#[async_trait]
impl BestMoveEngine for BrokenEngine {
    async fn best_move(&self, _position: &Position) -> Result<String, EngineError> {
        Err(EngineError::InvalidResponse("no bestmove".to_string()))
    }
}

/// Sink that records everything it publishes.
#[derive(Default)]
struct RecordingSink {
    published: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl CommentSink for RecordingSink {
    async fn publish(&self, session_id: &str, comment: &str, author: &str) -> Result<(), SinkError> {
        self.published.lock().unwrap().push((
            session_id.to_string(),
            comment.to_string(),
            author.to_string(),
        ));
        Ok(())
    }
}

fn engine_with(
    provider: &Arc<ScriptedProvider>,
    fallback: Arc<dyn BestMoveEngine>,
    sink: &Arc<RecordingSink>,
    policy: AcquisitionPolicy,
) -> MoveAcquisitionEngine {
    MoveAcquisitionEngine::new(
        Arc::new(TestRouter {
            provider: Arc::clone(provider),
        }),
        fallback,
        Arc::clone(sink) as Arc<dyn CommentSink>,
        policy,
        EscalationPolicy::default(),
    )
}

fn request() -> MoveRequest {
    MoveRequest::new(START_FEN, None, CLAUDE, "session-1")
}

fn synchronous_policy() -> AcquisitionPolicy {
    AcquisitionPolicy {
        provider_timeout: Duration::from_secs(5),
        ..AcquisitionPolicy::synchronous()
    }
}

#[tokio::test]
async fn compliant_first_attempt_succeeds() {
    let provider = ScriptedProvider::new(vec![Reply::Text(
        "<move>e4</move><reason>central control</reason>",
    )]);
    let sink = Arc::new(RecordingSink::default());
    let engine = engine_with(&provider, Arc::new(FixedEngine("d2d4")), &sink, synchronous_policy());

    let result = engine.acquire(request()).await.unwrap();

    assert_eq!(result.mv, "e4");
    assert_eq!(result.source, MoveSource::Model);
    assert_eq!(result.justification, "central control");
    assert_eq!(result.attempts.len(), 1);
    assert_eq!(result.attempts[0].index, 0);
    assert_eq!(result.next_san_history, "1. e4 ");
    assert!(result.next_fen.starts_with("rnbqkbnr/pppppppp/8/8/4P3/"));
}

#[tokio::test]
async fn unparseable_responses_exhaust_budget_then_fall_back() {
    let provider = ScriptedProvider::new(vec![
        Reply::Text("I would play pawn to king four."),
        Reply::Text("no tags here either"),
        Reply::Text("still rambling"),
        // One more for the justifier call on the fallback path
        Reply::Text("A strong central pawn push."),
    ]);
    let sink = Arc::new(RecordingSink::default());
    let engine = engine_with(&provider, Arc::new(FixedEngine("e2e4")), &sink, synchronous_policy());

    let result = engine.acquire(request()).await.unwrap();

    assert_eq!(result.source, MoveSource::Fallback);
    // The engine's best move, rendered as SAN
    assert_eq!(result.mv, "e4");
    assert_eq!(result.attempts.len(), 3);
    assert_eq!(result.justification, "A strong central pawn push.");
}

#[tokio::test]
async fn illegal_then_legal_uses_two_attempts() {
    let provider = ScriptedProvider::new(vec![
        // Syntactically valid but the queen cannot reach h5
        Reply::Text("<move>Qh5</move><reason>attack!</reason>"),
        Reply::Text("<move>Nf3</move><reason>develop the knight</reason>"),
    ]);
    let sink = Arc::new(RecordingSink::default());
    let engine = engine_with(&provider, Arc::new(FixedEngine("d2d4")), &sink, synchronous_policy());

    let result = engine.acquire(request()).await.unwrap();

    assert_eq!(result.mv, "Nf3");
    assert_eq!(result.source, MoveSource::Model);
    assert_eq!(result.attempts.len(), 2);
    assert_eq!(result.attempts[1].index, 1);
}

#[tokio::test]
async fn every_budget_size_performs_exactly_n_attempts() {
    for n in 1..=6u32 {
        let script = (0..n).map(|_| Reply::Text("<move>Qh5</move>")).collect();
        let provider = ScriptedProvider::new(script);
        let sink = Arc::new(RecordingSink::default());
        let policy = AcquisitionPolicy {
            max_attempts: n,
            justifier_model: None,
            provider_timeout: Duration::from_secs(5),
        };
        let engine = engine_with(&provider, Arc::new(FixedEngine("g1f3")), &sink, policy);

        let result = engine.acquire(request()).await.unwrap();

        assert_eq!(result.attempts.len(), n as usize, "budget {n}");
        assert_eq!(result.source, MoveSource::Fallback, "budget {n}");
        assert_eq!(result.mv, "Nf3", "budget {n}");
    }
}

#[tokio::test]
async fn transport_failures_consume_attempts_and_are_logged_distinctly() {
    let provider = ScriptedProvider::new(vec![
        Reply::Fail("connection reset"),
        Reply::Text("<move>e4</move><reason>center</reason>"),
    ]);
    let sink = Arc::new(RecordingSink::default());
    let engine = engine_with(&provider, Arc::new(FixedEngine("d2d4")), &sink, synchronous_policy());

    let result = engine.acquire(request()).await.unwrap();

    assert_eq!(result.source, MoveSource::Model);
    assert_eq!(result.attempts.len(), 2);
    // The failed attempt's opaque body marks the error
    let error_body = result.attempts[0].raw_response["error"].as_str().unwrap();
    assert!(error_body.contains("connection reset"));
    // The successful attempt carries the provider body instead
    assert!(result.attempts[1].raw_response.get("error").is_none());
}

#[tokio::test]
async fn hung_provider_times_out_and_consumes_one_attempt() {
    let provider = ScriptedProvider::new(vec![Reply::Hang]);
    let sink = Arc::new(RecordingSink::default());
    let policy = AcquisitionPolicy {
        max_attempts: 1,
        justifier_model: None,
        provider_timeout: Duration::from_millis(50),
    };
    let engine = engine_with(&provider, Arc::new(FixedEngine("e2e4")), &sink, policy);

    let result = engine.acquire(request()).await.unwrap();

    assert_eq!(result.source, MoveSource::Fallback);
    assert_eq!(result.attempts.len(), 1);
    let error_body = result.attempts[0].raw_response["error"].as_str().unwrap();
    assert!(error_body.contains("timed out"));
}

#[tokio::test]
async fn unknown_provider_id_is_fatal_without_attempts() {
    let provider = ScriptedProvider::new(vec![Reply::Text("<move>e4</move>")]);
    let sink = Arc::new(RecordingSink::default());
    let engine = engine_with(&provider, Arc::new(FixedEngine("e2e4")), &sink, synchronous_policy());

    let mut bad = request();
    bad.model_id = "openai.gpt-4".to_string();
    let err = engine.acquire(bad).await.unwrap_err();

    assert!(matches!(err, AcquisitionError::UnknownProvider(_)));
    // No provider call was made
    assert!(provider.temperatures().is_empty());
}

#[tokio::test]
async fn fallback_engine_failure_is_fatal() {
    let provider = ScriptedProvider::new(vec![Reply::Text("garbage")]);
    let sink = Arc::new(RecordingSink::default());
    let policy = AcquisitionPolicy {
        max_attempts: 1,
        justifier_model: None,
        provider_timeout: Duration::from_secs(5),
    };
    let engine = engine_with(&provider, Arc::new(BrokenEngine), &sink, policy);

    let err = engine.acquire(request()).await.unwrap_err();
    assert!(matches!(err, AcquisitionError::FallbackEngine(_)));
}

#[tokio::test]
async fn failed_justification_substitutes_default_label() {
    // One rambling move attempt, then the justifier call also fails
    let provider = ScriptedProvider::new(vec![Reply::Text("no move"), Reply::Fail("boom")]);
    let sink = Arc::new(RecordingSink::default());
    let policy = AcquisitionPolicy {
        max_attempts: 1,
        justifier_model: None,
        provider_timeout: Duration::from_secs(5),
    };
    let engine = engine_with(&provider, Arc::new(FixedEngine("e2e4")), &sink, policy);

    let result = engine.acquire(request()).await.unwrap();

    assert_eq!(result.source, MoveSource::Fallback);
    // Imported profile: side-color prefix plus the substituted label
    assert_eq!(
        result.justification,
        format!("Helper(CMI) - WHITE: {DEFAULT_JUSTIFICATION}")
    );
}

#[tokio::test]
async fn temperature_escalates_across_attempts() {
    let provider = ScriptedProvider::new(vec![
        Reply::Text("junk"),
        Reply::Text("junk"),
        Reply::Text("<move>e4</move>"),
    ]);
    let sink = Arc::new(RecordingSink::default());
    let engine = engine_with(&provider, Arc::new(FixedEngine("d2d4")), &sink, synchronous_policy());

    engine.acquire(request()).await.unwrap();

    let temps = provider.temperatures();
    assert_eq!(temps.len(), 3);
    assert!((temps[0] - 0.6).abs() < 1e-12, "attempt 0 must use base exactly");
    assert!(temps[1] > temps[0]);
    assert!(temps[2] > temps[1]);
}

#[tokio::test]
async fn justification_is_published_with_side_tagged_author() {
    let provider = ScriptedProvider::new(vec![Reply::Text(
        "<move>e4</move><reason>it controls \"the center\"</reason>",
    )]);
    let sink = Arc::new(RecordingSink::default());
    let engine = engine_with(&provider, Arc::new(FixedEngine("d2d4")), &sink, synchronous_policy());

    engine.acquire(request()).await.unwrap();

    let published = sink.published.lock().unwrap();
    assert_eq!(published.len(), 1);
    let (session, comment, author) = &published[0];
    assert_eq!(session, "session-1");
    assert_eq!(author, &format!("{CLAUDE}#w"));
    // Double quotes are replaced before delivery
    assert_eq!(comment, "it controls 'the center'");
}

#[tokio::test]
async fn untagged_reason_falls_back_to_whole_text() {
    let provider = ScriptedProvider::new(vec![Reply::Text("<move>e4</move> best by test")]);
    let sink = Arc::new(RecordingSink::default());
    let engine = engine_with(&provider, Arc::new(FixedEngine("d2d4")), &sink, synchronous_policy());

    let result = engine.acquire(request()).await.unwrap();
    assert_eq!(result.justification, "<move>e4</move> best by test");
}

#[tokio::test]
async fn answer_question_returns_trimmed_text() {
    let provider = ScriptedProvider::new(vec![Reply::Text("  White is slightly better.\n")]);
    let sink = Arc::new(RecordingSink::default());
    let engine = engine_with(&provider, Arc::new(FixedEngine("d2d4")), &sink, synchronous_policy());

    let answer = engine
        .answer_question(&request(), "who is winning?")
        .await
        .unwrap();
    assert_eq!(answer, "White is slightly better.");
}

#[tokio::test]
async fn question_provider_failure_is_surfaced() {
    let provider = ScriptedProvider::new(vec![Reply::Fail("down")]);
    let sink = Arc::new(RecordingSink::default());
    let engine = engine_with(&provider, Arc::new(FixedEngine("d2d4")), &sink, synchronous_policy());

    let err = engine
        .answer_question(&request(), "who is winning?")
        .await
        .unwrap_err();
    assert!(matches!(err, AcquisitionError::Question(_)));
}

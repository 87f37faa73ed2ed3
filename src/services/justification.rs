//! Justification synthesis for fallback moves.
//!
//! Decoupled from move generation on purpose: the move is already decided
//! and legal by the time this runs, so nothing here can affect legality,
//! and a synthesis failure substitutes a generic label instead of aborting
//! the move result.

use std::sync::Arc;

use tracing::warn;

use crate::domain::models::{Position, SamplingConfig};
use crate::domain::ports::{GenerateRequest, ProviderRouter};
use crate::services::prompt_builder;

/// Label substituted when justification synthesis fails.
pub const DEFAULT_JUSTIFICATION: &str = "Engine-assisted move selection.";

/// Synthesizes a short rationale for an already-decided move.
pub struct JustificationSynthesizer {
    providers: Arc<dyn ProviderRouter>,
    max_tokens: u32,
}

impl JustificationSynthesizer {
    /// Create a synthesizer over the given provider registry.
    pub fn new(providers: Arc<dyn ProviderRouter>) -> Self {
        Self {
            providers,
            max_tokens: 200,
        }
    }

    /// Ask `model_id` for a short rationale for playing `san` from
    /// `position`. Returns `None` on any failure; callers substitute the
    /// default label.
    pub async fn synthesize(
        &self,
        position: &Position,
        san: &str,
        model_id: &str,
    ) -> Option<String> {
        let provider = match self.providers.resolve(model_id) {
            Ok(provider) => provider,
            Err(err) => {
                warn!(%model_id, error = %err, "justifier model not routable");
                return None;
            }
        };

        let sampling = SamplingConfig {
            max_tokens: self.max_tokens,
            ..SamplingConfig::default()
        };
        let mut request =
            GenerateRequest::new(model_id, prompt_builder::justification_prompt(position, san), sampling);
        request.system = Some(prompt_builder::justification_system_prompt(position));

        match provider.generate(&request).await {
            Ok(completion) => {
                let cleaned = completion.text.replace('\n', "").replace('"', "");
                let cleaned = cleaned.trim();
                if cleaned.is_empty() {
                    None
                } else {
                    Some(cleaned.to_string())
                }
            }
            Err(err) => {
                warn!(%model_id, error = %err, "justification synthesis failed");
                None
            }
        }
    }
}

//! Cohere Command adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::client::BedrockRuntimeClient;
use crate::domain::ports::{GenerateRequest, ModelProvider, ProviderError, RawCompletion};

const P: f64 = 1.0;
const K: u32 = 0;

/// Adapter for `cohere.*` model ids.
pub struct CommandProvider {
    client: Arc<BedrockRuntimeClient>,
}

impl CommandProvider {
    /// Create the adapter over a shared runtime client.
    pub fn new(client: Arc<BedrockRuntimeClient>) -> Self {
        Self { client }
    }
}

fn request_body(request: &GenerateRequest) -> Value {
    json!({
        "prompt": request.prompt,
        "temperature": request.sampling.temperature,
        "max_tokens": request.sampling.max_tokens,
        "p": request.sampling.top_p.unwrap_or(P),
        "k": request.sampling.top_k.unwrap_or(K),
    })
}

fn completion_text(body: &Value) -> String {
    body["generations"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl ModelProvider for CommandProvider {
    fn family(&self) -> &'static str {
        "cohere"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<RawCompletion, ProviderError> {
        let body = self.client.invoke(&request.model_id, &request_body(request)).await?;
        Ok(RawCompletion {
            text: completion_text(&body),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SamplingConfig;

    #[test]
    fn body_uses_command_schema() {
        let request = GenerateRequest::new("cohere.command-text-v14", "prompt", SamplingConfig::default());
        let body = request_body(&request);

        assert_eq!(body["max_tokens"], 200);
        assert_eq!(body["p"], 1.0);
        assert_eq!(body["k"], 0);
    }

    #[test]
    fn extracts_generation_text() {
        let body = json!({"generations": [{"text": "<move>c5</move>"}]});
        assert_eq!(completion_text(&body), "<move>c5</move>");
    }
}

//! Amazon Titan text adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::client::BedrockRuntimeClient;
use crate::domain::ports::{GenerateRequest, ModelProvider, ProviderError, RawCompletion};

const TOP_P: f64 = 1.0;

/// Adapter for `amazon.*` model ids.
pub struct TitanProvider {
    client: Arc<BedrockRuntimeClient>,
}

impl TitanProvider {
    /// Create the adapter over a shared runtime client.
    pub fn new(client: Arc<BedrockRuntimeClient>) -> Self {
        Self { client }
    }
}

fn request_body(request: &GenerateRequest) -> Value {
    json!({
        "inputText": request.prompt,
        "textGenerationConfig": {
            "maxTokenCount": request.sampling.max_tokens,
            "temperature": request.sampling.temperature,
            "topP": request.sampling.top_p.unwrap_or(TOP_P),
        }
    })
}

fn completion_text(body: &Value) -> String {
    body["results"][0]["outputText"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl ModelProvider for TitanProvider {
    fn family(&self) -> &'static str {
        "amazon"
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
    fn body_uses_titan_schema() {
        let request = GenerateRequest::new("amazon.titan-text-express-v1", "prompt text", SamplingConfig::default());
        let body = request_body(&request);

        assert_eq!(body["inputText"], "prompt text");
        assert_eq!(body["textGenerationConfig"]["maxTokenCount"], 200);
        assert_eq!(body["textGenerationConfig"]["topP"], 1.0);
    }

    #[test]
    fn extracts_output_text() {
        let body = json!({"results": [{"outputText": "<move>e4</move>"}]});
        assert_eq!(completion_text(&body), "<move>e4</move>");
    }

    #[test]
    fn missing_output_yields_empty_text() {
        assert_eq!(completion_text(&json!({"unexpected": true})), "");
    }
}

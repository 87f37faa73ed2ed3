//! AI21 Jurassic adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::client::BedrockRuntimeClient;
use crate::domain::ports::{GenerateRequest, ModelProvider, ProviderError, RawCompletion};

/// Adapter for `ai21.*` model ids.
pub struct JurassicProvider {
    client: Arc<BedrockRuntimeClient>,
}

impl JurassicProvider {
    /// Create the adapter over a shared runtime client.
    pub fn new(client: Arc<BedrockRuntimeClient>) -> Self {
        Self { client }
    }
}

fn request_body(request: &GenerateRequest) -> Value {
    json!({
        "prompt": request.prompt,
        "temperature": request.sampling.temperature,
        "maxTokens": request.sampling.max_tokens,
    })
}

fn completion_text(body: &Value) -> String {
    body["completions"][0]["data"]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl ModelProvider for JurassicProvider {
    fn family(&self) -> &'static str {
        "ai21"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<RawCompletion, ProviderError> {
        let body = self.client.invoke(&request.model_id, &request_body(request)).await?;
        Ok(RawCompletion {
            text: completion_text(&body),
            body,
        })
    }
}

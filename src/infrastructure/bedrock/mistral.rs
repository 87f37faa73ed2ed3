//! Mistral adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::client::BedrockRuntimeClient;
use crate::domain::ports::{GenerateRequest, ModelProvider, ProviderError, RawCompletion};

const MAX_TOKENS: u32 = 400;
const TOP_P: f64 = 0.7;
const TOP_K: u32 = 50;

/// Adapter for `mistral.*` model ids.
pub struct MistralProvider {
    client: Arc<BedrockRuntimeClient>,
}

impl MistralProvider {
    /// Create the adapter over a shared runtime client.
    pub fn new(client: Arc<BedrockRuntimeClient>) -> Self {
        Self { client }
    }
}

fn request_body(request: &GenerateRequest) -> Value {
    json!({
        "prompt": request.prompt,
        "max_tokens": MAX_TOKENS,
        "temperature": request.sampling.temperature,
        "top_p": request.sampling.top_p.unwrap_or(TOP_P),
        "top_k": request.sampling.top_k.unwrap_or(TOP_K),
    })
}

fn completion_text(body: &Value) -> String {
    body["outputs"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl ModelProvider for MistralProvider {
    fn family(&self) -> &'static str {
        "mistral"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<RawCompletion, ProviderError> {
        let body = self.client.invoke(&request.model_id, &request_body(request)).await?;
        Ok(RawCompletion {
            text: completion_text(&body),
            body,
        })
    }
}

//! Anthropic Claude adapter (messages API).
//!
//! One of the two conversational adapters: prior comments are reconstructed
//! into strictly alternating user/assistant messages before the new prompt
//! is appended — the backend rejects requests that do not alternate.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::client::BedrockRuntimeClient;
use crate::domain::ports::{
    conversation, GenerateRequest, ModelProvider, ProviderError, RawCompletion, Role,
};

const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Adapter for `anthropic.*` model ids.
pub struct ClaudeProvider {
    client: Arc<BedrockRuntimeClient>,
}

impl ClaudeProvider {
    /// Create the adapter over a shared runtime client.
    pub fn new(client: Arc<BedrockRuntimeClient>) -> Self {
        Self { client }
    }
}

fn request_body(request: &GenerateRequest) -> Value {
    let messages: Vec<Value> = conversation(&request.history, request.prompt.clone())
        .into_iter()
        .map(|turn| {
            json!({
                "role": match turn.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                "content": turn.text,
            })
        })
        .collect();

    let mut body = json!({
        "anthropic_version": ANTHROPIC_VERSION,
        "max_tokens": request.sampling.max_tokens,
        "messages": messages,
        "temperature": request.sampling.temperature,
    });
    if let Some(ref system) = request.system {
        body["system"] = json!(system);
    }
    body
}

fn completion_text(body: &Value) -> String {
    body["content"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl ModelProvider for ClaudeProvider {
    fn family(&self) -> &'static str {
        "anthropic"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<RawCompletion, ProviderError> {
        let body = self.client.invoke(&request.model_id, &request_body(request)).await?;
        Ok(RawCompletion {
            text: completion_text(&body),
            body,
        })
    }

    fn supports_history(&self) -> bool {
        true
    }
}

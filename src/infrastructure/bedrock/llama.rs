//! Meta Llama adapter.
//!
//! The second conversational adapter. Llama has no structured messages
//! field, so the alternating turns are folded into its instruct chat
//! template and the request ends with an open assistant header for the
//! model to complete.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::client::BedrockRuntimeClient;
use crate::domain::ports::{
    conversation, GenerateRequest, ModelProvider, ProviderError, RawCompletion, Role,
};

const TOP_P: f64 = 0.9;
const MAX_GEN_LEN: u32 = 512;

/// Adapter for `meta.*` model ids.
pub struct LlamaProvider {
    client: Arc<BedrockRuntimeClient>,
}

impl LlamaProvider {
    /// Create the adapter over a shared runtime client.
    pub fn new(client: Arc<BedrockRuntimeClient>) -> Self {
        Self { client }
    }
}

fn render_prompt(request: &GenerateRequest) -> String {
    let mut rendered = String::from("<|begin_of_text|>");
    if let Some(ref system) = request.system {
        rendered.push_str(&format!(
            "<|start_header_id|>system<|end_header_id|>\n\n{system}<|eot_id|>"
        ));
    }
    for turn in conversation(&request.history, request.prompt.clone()) {
        let role = match turn.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        rendered.push_str(&format!(
            "<|start_header_id|>{role}<|end_header_id|>\n\n{}<|eot_id|>",
            turn.text
        ));
    }
    rendered.push_str("<|start_header_id|>assistant<|end_header_id|>\n\n");
    rendered
}

fn request_body(request: &GenerateRequest) -> Value {
    json!({
        "prompt": render_prompt(request),
        "temperature": request.sampling.temperature,
        "top_p": request.sampling.top_p.unwrap_or(TOP_P),
        "max_gen_len": MAX_GEN_LEN,
    })
}

fn completion_text(body: &Value) -> String {
    body["generation"].as_str().unwrap_or_default().to_string()
}

#[async_trait]
impl ModelProvider for LlamaProvider {
    fn family(&self) -> &'static str {
        "meta"
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

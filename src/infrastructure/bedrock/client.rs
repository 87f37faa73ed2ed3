//! HTTP client for the Bedrock runtime invoke endpoint.
//!
//! One client instance is shared by all six provider adapters; it owns the
//! connection pool, the auth header and the per-request timeout. It does
//! not retry: one invocation is exactly one attempt in the acquisition
//! loop, and re-driving failed attempts is the orchestrator's job.

use std::time::Duration;

use reqwest::{header, Client as ReqwestClient, Response};
use tracing::{debug, info, warn};

use super::error::BedrockApiError;
use crate::domain::models::BedrockConfig;

/// Environment variable consulted for the bearer token when the config
/// leaves it unset.
pub const BEARER_TOKEN_ENV: &str = "AWS_BEARER_TOKEN_BEDROCK";

/// Configuration for the Bedrock runtime client.
#[derive(Debug, Clone)]
pub struct BedrockRuntimeConfig {
    /// Base URL of the regional runtime endpoint.
    pub base_url: String,

    /// Bearer token for the runtime API.
    pub api_key: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl BedrockRuntimeConfig {
    /// Build the runtime config from application settings, falling back to
    /// the environment for the token.
    pub fn from_settings(settings: &BedrockConfig) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            api_key: settings
                .api_key
                .clone()
                .or_else(|| std::env::var(BEARER_TOKEN_ENV).ok())
                .unwrap_or_default(),
            timeout_secs: settings.timeout_secs,
        }
    }
}

/// HTTP client for `POST {base_url}/model/{model_id}/invoke`.
pub struct BedrockRuntimeClient {
    http_client: ReqwestClient,
    base_url: String,
}

impl BedrockRuntimeClient {
    /// Create a new runtime client.
    pub fn new(config: BedrockRuntimeConfig) -> Result<Self, BedrockApiError> {
        let token_scrubbed = if config.api_key.len() > 8 {
            format!("{}...[REDACTED]", &config.api_key[..8])
        } else {
            "[REDACTED]".to_string()
        };
        info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            token = %token_scrubbed,
            "initializing bedrock runtime client"
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|e| BedrockApiError::InvalidRequest(format!("invalid token: {e}")))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()
            .map_err(BedrockApiError::NetworkError)?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Invoke a model with a family-specific JSON body and return the raw
    /// JSON response body.
    pub async fn invoke(
        &self,
        model_id: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, BedrockApiError> {
        let url = format!("{}/model/{}/invoke", self.base_url, model_id);
        debug!(%url, "POST");

        let response = self.http_client.post(&url).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response(
        &self,
        response: Response,
    ) -> Result<serde_json::Value, BedrockApiError> {
        let status = response.status();
        debug!(%status, "response status");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string());
            warn!(%status, %body, "bedrock runtime error");
            return Err(BedrockApiError::from_status(status, body));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(BedrockApiError::SerializationError)
    }
}

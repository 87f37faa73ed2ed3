//! Provider registry.
//!
//! Maps vendor prefixes to adapter instances, resolved once at startup and
//! looked up per call. An id whose prefix matches no registered family is
//! a configuration error and fails fast — it never consumes an attempt.

use std::collections::HashMap;
use std::sync::Arc;

use super::client::{BedrockRuntimeClient, BedrockRuntimeConfig};
use super::error::BedrockApiError;
use super::{
    ClaudeProvider, CommandProvider, JurassicProvider, LlamaProvider, MistralProvider,
    TitanProvider,
};
use crate::domain::models::BedrockConfig;
use crate::domain::ports::{ModelProvider, ProviderRouter, UnknownProviderError};

/// Registry of provider adapters keyed by vendor prefix.
pub struct ProviderRegistry {
    providers: HashMap<&'static str, Arc<dyn ModelProvider>>,
}

impl ProviderRegistry {
    /// Build the registry and its shared runtime client from settings.
    pub fn from_config(settings: &BedrockConfig) -> Result<Self, BedrockApiError> {
        let client = Arc::new(BedrockRuntimeClient::new(BedrockRuntimeConfig::from_settings(
            settings,
        ))?);
        Ok(Self::with_client(&client))
    }

    /// Build the registry over an existing runtime client.
    pub fn with_client(client: &Arc<BedrockRuntimeClient>) -> Self {
        let mut providers: HashMap<&'static str, Arc<dyn ModelProvider>> = HashMap::new();
        providers.insert("amazon", Arc::new(TitanProvider::new(Arc::clone(client))));
        providers.insert("anthropic", Arc::new(ClaudeProvider::new(Arc::clone(client))));
        providers.insert("ai21", Arc::new(JurassicProvider::new(Arc::clone(client))));
        providers.insert("cohere", Arc::new(CommandProvider::new(Arc::clone(client))));
        providers.insert("meta", Arc::new(LlamaProvider::new(Arc::clone(client))));
        providers.insert("mistral", Arc::new(MistralProvider::new(Arc::clone(client))));
        Self { providers }
    }

    /// Registered vendor prefixes.
    pub fn families(&self) -> Vec<&'static str> {
        self.providers.keys().copied().collect()
    }
}

impl ProviderRouter for ProviderRegistry {
    fn resolve(&self, model_id: &str) -> Result<Arc<dyn ModelProvider>, UnknownProviderError> {
        self.providers
            .iter()
            .find(|(prefix, _)| model_id.starts_with(*prefix))
            .map(|(_, provider)| Arc::clone(provider))
            .ok_or_else(|| UnknownProviderError {
                model_id: model_id.to_string(),
            })
    }
}

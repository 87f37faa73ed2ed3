//! Bedrock runtime integration.
//!
//! A shared HTTP client plus one adapter per backend family. Adapters own
//! schema translation only; retry, legality and fallback live in the
//! acquisition engine.

pub mod claude;
pub mod client;
pub mod command;
pub mod error;
pub mod jurassic;
pub mod llama;
pub mod mistral;
pub mod registry;
pub mod titan;

pub use claude::ClaudeProvider;
pub use client::{BedrockRuntimeClient, BedrockRuntimeConfig, BEARER_TOKEN_ENV};
pub use command::CommandProvider;
pub use error::BedrockApiError;
pub use jurassic::JurassicProvider;
pub use llama::LlamaProvider;
pub use mistral::MistralProvider;
pub use registry::ProviderRegistry;
pub use titan::TitanProvider;

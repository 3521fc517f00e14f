//! Completion-service adapters for Path Finder.
//!
//! The single implementation speaks the OpenAI `/v1/chat/completions`
//! protocol, which also covers compatible endpoints (Azure OpenAI,
//! OpenRouter, local vLLM/Ollama gateways).

pub mod openai;

pub use openai::OpenAiProvider;

/// Build the provider from configuration.
pub fn build_from_config(config: &pathfinder_config::AppConfig) -> OpenAiProvider {
    OpenAiProvider::new(&config.api_url, config.api_key.clone())
}

//! Provider trait — the abstraction over the completion backend.
//!
//! A Provider knows how to send an assembled message list to an LLM and
//! get a single text reply back. There is deliberately no streaming and
//! no retry logic here: one request, one response, or one error.

use crate::error::ProviderError;
use crate::message::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A completion request: the assembled message list plus fixed sampling
/// parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use (e.g., "gpt-4o-mini")
    pub model: String,

    /// The ordered message list (system layers first, then the transcript)
    pub messages: Vec<Message>,

    /// Temperature (low and fixed — advising should not be creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.3
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The generated reply text
    pub content: String,

    /// Token usage statistics
    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The completion backend trait.
///
/// The advisor session calls `complete()` without knowing which backend is
/// configured. A failed call surfaces as a single `ProviderError`; the
/// caller decides whether to show an apology or re-raise.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError>;

    /// Health check — can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    #[test]
    fn request_defaults_to_low_temperature() {
        let json = r#"{"model":"gpt-4o-mini","messages":[]}"#;
        let req: CompletionRequest = serde_json::from_str(json).unwrap();
        assert!((req.temperature - 0.3).abs() < f32::EPSILON);
        assert!(req.max_tokens.is_none());
    }

    #[test]
    fn request_serialization_keeps_message_order() {
        let req = CompletionRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![
                Message::system("Du bist ein Berater."),
                Message::user("Hallo"),
            ],
            temperature: 0.3,
            max_tokens: Some(500),
        };
        let json = serde_json::to_string(&req).unwrap();
        let parsed: CompletionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.messages.len(), 2);
        assert_eq!(parsed.messages[0].content, "Du bist ein Berater.");
        assert_eq!(parsed.max_tokens, Some(500));
    }
}

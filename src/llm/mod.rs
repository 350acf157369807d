//! LLM: chat relay to an OpenAI-compatible completions service.
//!
//! DESIGN
//! ======
//! Configured entirely from environment variables. Groq and `OpenAI` share
//! the chat completions wire format, so one HTTP client covers both and the
//! provider only picks defaults (base URL, model, key variable).

pub mod config;
pub mod openai;
pub mod types;

use config::LlmConfig;
pub use types::ChatRelay;
use types::LlmError;

/// Relay client for the configured provider.
pub struct LlmClient {
    inner: openai::OpenAiClient,
    model: String,
    max_tokens: Option<u32>,
}

impl LlmClient {
    /// Build a relay client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build a relay client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        tracing::debug!(provider = ?config.provider, base_url = %config.base_url, "llm: building client");
        let inner = openai::OpenAiClient::new(config.api_key, &config.base_url, config.timeouts)?;
        Ok(Self { inner, model: config.model, max_tokens: config.max_tokens })
    }
}

#[async_trait::async_trait]
impl ChatRelay for LlmClient {
    async fn relay(&self, content: &str) -> Result<serde_json::Value, LlmError> {
        let body = self
            .inner
            .complete(&self.model, self.max_tokens, content)
            .await?;
        if let Some(text) = openai::reply_text(&body) {
            tracing::debug!(model = %self.model, reply_len = text.len(), "llm: completion received");
        }
        Ok(body)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

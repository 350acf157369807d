//! LLM types: chat messages, errors, and the relay trait.

use serde::Serialize;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body was not JSON.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl LlmError {
    /// Whether retrying the same request could succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }

    /// Body the provider sent with a non-success status, if any.
    #[must_use]
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            Self::ApiResponse { body, .. } => Some(body),
            _ => None,
        }
    }
}

// =============================================================================
// MESSAGE TYPES
// =============================================================================

/// Author of a chat message. The relay only ever speaks for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

// =============================================================================
// CHAT RELAY TRAIT
// =============================================================================

/// Forwards one user message to a completion service and hands back the
/// provider's response body untouched. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ChatRelay: Send + Sync {
    /// Send `content` as a single user message.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the provider returns a
    /// non-success status, or the body is not JSON.
    async fn relay(&self, content: &str) -> Result<serde_json::Value, LlmError>;

    /// Model name requests are sent to.
    fn model(&self) -> &str;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

//! OpenAI-compatible chat completions client.
//!
//! Groq and `OpenAI` both speak `POST {base}/chat/completions`; the relay
//! sends one user message and returns the decoded body as-is.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{LlmError, Message};

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if reqwest rejects the settings.
    pub fn new(api_key: String, base_url: &str, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self { http, api_key, base_url })
    }

    /// Send a single-message completion request.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-200 statuses, and non-JSON bodies.
    pub async fn complete(&self, model: &str, max_tokens: Option<u32>, content: &str) -> Result<Value, LlmError> {
        let messages = [Message::user(content)];
        let body = CcRequest { model, messages: &messages, max_tokens };
        let text = self.send_json("/chat/completions", &body).await?;
        serde_json::from_str(&text).map_err(|e| LlmError::ApiParse(e.to_string()))
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// First choice's assistant text, if the body has the usual shape.
#[must_use]
pub fn reply_text(body: &Value) -> Option<&str> {
    body.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;

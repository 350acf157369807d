//! Chat relay endpoint.
//!
//! `POST /chat` takes `{"data": "..."}`, forwards it as one user message and
//! answers with the provider's JSON exactly as received.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::llm::types::LlmError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub data: String,
}

type ChatError = (StatusCode, Json<Value>);

fn error_body(status: StatusCode, message: impl Into<String>) -> ChatError {
    (status, Json(json!({ "error": message.into() })))
}

/// Map relay failures to the status the caller sees.
pub(crate) fn llm_error_to_status(err: &LlmError) -> StatusCode {
    match err {
        LlmError::ConfigParse(_) | LlmError::MissingApiKey { .. } | LlmError::HttpClientBuild(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        LlmError::ApiRequest(_) | LlmError::ApiResponse { .. } | LlmError::ApiParse(_) => StatusCode::BAD_GATEWAY,
    }
}

/// # Errors
///
/// 400 for blank input, 503 when no relay is configured, otherwise the
/// mapped [`LlmError`] status with an `{"error": ..}` body.
pub async fn relay_chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<Value>, ChatError> {
    if body.data.trim().is_empty() {
        return Err(error_body(StatusCode::BAD_REQUEST, "data must not be empty"));
    }
    let Some(relay) = state.relay.as_ref() else {
        return Err(error_body(StatusCode::SERVICE_UNAVAILABLE, "chat relay not configured"));
    };

    match relay.relay(&body.data).await {
        Ok(reply) => Ok(Json(reply)),
        Err(e) => {
            let status = llm_error_to_status(&e);
            tracing::warn!(
                error = %e,
                upstream_body = e.upstream_body().unwrap_or_default(),
                model = relay.model(),
                retryable = e.retryable(),
                "chat: relay failed"
            );
            Err(error_body(status, e.to_string()))
        }
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

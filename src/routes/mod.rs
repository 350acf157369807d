//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router carries the chat relay API and serves the compiled board
//! UI (`index.html` plus the wasm-bindgen `pkg/` output) as static files.

pub mod chat;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes, falling back to the board UI for every other path.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let board = ServeDir::new(&state.board_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/", get(hello))
        .route("/chat", post(chat::relay_chat))
        .route("/healthz", get(healthz))
        .fallback_service(board)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn hello() -> &'static str {
    "Hello, World!"
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! relay is optional: the server still serves the board UI when no LLM
//! credentials are configured.

use std::path::PathBuf;
use std::sync::Arc;

use crate::llm::ChatRelay;

#[derive(Clone)]
pub struct AppState {
    /// `None` if LLM env vars are not configured.
    pub relay: Option<Arc<dyn ChatRelay>>,
    /// Directory holding the static board UI.
    pub board_dir: PathBuf,
}

impl AppState {
    #[must_use]
    pub fn new(relay: Option<Arc<dyn ChatRelay>>, board_dir: PathBuf) -> Self {
        Self { relay, board_dir }
    }
}

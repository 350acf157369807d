mod llm;
mod routes;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .map_err(|e| format!("invalid PORT: {e}"))?;
    let board_dir = PathBuf::from(std::env::var("BOARD_DIR").unwrap_or_else(|_| "web".into()));

    // Non-fatal: the board UI is still served without a relay.
    let relay: Option<Arc<dyn llm::ChatRelay>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = llm::ChatRelay::model(&client), "chat relay initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "chat relay not configured; POST /chat disabled");
            None
        }
    };

    let app = routes::app(state::AppState::new(relay, board_dir.clone()));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, board_dir = %board_dir.display(), "cardlanes listening");
    axum::serve(listener, app).await?;
    Ok(())
}

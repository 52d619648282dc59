mod candidates;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod search;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::candidates::PgCandidateStore;
use crate::config::Config;
use crate::routes::build_router;
use crate::search::ranker::Ranker;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Talent API v{}", env!("CARGO_PKG_VERSION"));

    // Candidate source
    let store = PgCandidateStore::connect(&config.database_url).await?;

    // Ranker over the chat-completions backend
    if config.search.api_key.is_none() {
        info!("No LLM API key configured; AI search will use fallback scoring only");
    }
    let ranker = Ranker::from_config(config.search.clone())?;
    info!(
        "Ranker initialized (model: {}, timeout: {:?}, max candidates per call: {})",
        config.search.model, config.search.timeout, config.search.max_candidates_per_call
    );

    let state = AppState {
        store: Arc::new(store),
        ranker: Arc::new(ranker),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // dashboard calls the API straight from the browser

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

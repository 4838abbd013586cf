mod chat;
mod config;
mod errors;
mod llm_client;
mod routes;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::AiService;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hirewise API v{}", env!("CARGO_PKG_VERSION"));

    // A client that cannot be built is treated like a missing key.
    let ai = match AiService::from_config(&config) {
        Ok(Some(ai)) => {
            info!(
                "LLM provider initialized: {} (model: {})",
                ai.provider_name(),
                ai.model()
            );
            Some(ai)
        }
        Ok(None) => {
            warn!("No LLM API key configured; chat will answer with setup guidance");
            None
        }
        Err(e) => {
            warn!("LLM provider unavailable, continuing without one: {e}");
            None
        }
    };

    let state = AppState {
        ai,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the marketing site domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

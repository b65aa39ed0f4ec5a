mod advisor;
mod config;
mod db;
mod errors;
mod llm_client;
mod matching;
mod roadmap;
mod routes;
mod state;
mod students;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advisor::service::ClovaAdvisor;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::roadmap::provider::HttpRoadmapProvider;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first: startup fails on missing required env vars
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Advisor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(
        config.ncp_api_key.clone(),
        config.chat_endpoint.clone(),
        config.task_endpoint.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let roadmap_provider = HttpRoadmapProvider::new(config.roadmap_service_url.clone())?;
    info!("Roadmap service at {}", config.roadmap_service_url);

    let state = AppState {
        db,
        advisor: Arc::new(ClovaAdvisor::new(llm)),
        roadmap_provider: Arc::new(roadmap_provider),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

mod assistant;
mod config;
mod errors;
mod extraction;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::AssistantClient;
use crate::config::{Config, EnvSecrets, API_KEY_VAR};
use crate::routes::build_router;
use crate::scoring::{KeywordScorer, RuleSet};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume screener v{}", env!("CARGO_PKG_VERSION"));

    // Rule table is built once and shared read-only
    let rules = RuleSet::telephonist();
    info!(
        "Loaded {} checks and {} penalties",
        rules.checks.len(),
        rules.penalties.len()
    );
    let scorer = Arc::new(KeywordScorer::new(rules));

    let assistant = AssistantClient::new(&config);
    info!(
        "Assistant client initialized (model: {}, key read per request from {})",
        assistant.model(),
        API_KEY_VAR
    );

    let state = AppState {
        config: config.clone(),
        scorer,
        assistant: Arc::new(assistant),
        secrets: Arc::new(EnvSecrets),
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

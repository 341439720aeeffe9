mod config;
mod db;
mod errors;
mod llm_client;
mod matching;
mod models;
mod roadmap;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::matching::compatibility::LlmCompatibilityScorer;
use crate::roadmap::planner::LlmRoadmapPlanner;
use crate::roadmap::service::RoadmapService;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::{PgCandidateStore, PgJobRequirementStore, PgRoadmapStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pivot API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    if llm.is_configured() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        warn!("ANTHROPIC_API_KEY is not set — roadmap generation will use the fallback template");
    }

    // Store adapters
    let candidates = Arc::new(PgCandidateStore::new(db.clone()));
    let requirements = Arc::new(PgJobRequirementStore::new(db.clone()));
    let roadmap_store = Arc::new(PgRoadmapStore::new(db.clone()));

    // Roadmap orchestration with the LLM-backed planner
    let roadmaps = Arc::new(RoadmapService::new(
        candidates.clone(),
        requirements,
        roadmap_store,
        Arc::new(LlmRoadmapPlanner(llm.clone())),
    ));

    // Compatibility scorer (handler degrades to the heuristic on failure)
    let compat_scorer = Arc::new(LlmCompatibilityScorer(llm.clone()));

    // Build app state
    let state = AppState {
        llm,
        roadmaps,
        compat_scorer,
        candidates,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

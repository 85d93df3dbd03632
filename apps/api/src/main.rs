mod background;
mod candidates;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod parser;
mod routes;
mod search;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::background::github::GitHubClient;
use crate::background::BackgroundScorer;
use crate::candidates::archive::ResumeArchive;
use crate::candidates::extract::PdfTextExtractor;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::parser::StructuredParser;
use crate::routes::build_router;
use crate::search::ranker::BackgroundRanker;
use crate::state::AppState;
use crate::store::{CandidateRepository, MemoryCandidateRepository, PgCandidateRepository};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hireflow API v{}", env!("CARGO_PKG_VERSION"));

    // Candidate store: PostgreSQL when configured, otherwise process memory
    let candidates: Arc<dyn CandidateRepository> = match &config.database_url {
        Some(url) => Arc::new(PgCandidateRepository::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set; candidates are kept in memory and lost on restart");
            Arc::new(MemoryCandidateRepository::new())
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let parser = StructuredParser::new(Arc::new(llm));

    // Background scoring (BackgroundRanker by default)
    let code_host = GitHubClient::new(config.github_api_url.clone(), config.github_token.clone());
    let ranker = Arc::new(BackgroundRanker::new(BackgroundScorer::new(Arc::new(code_host))));

    // Optional S3 / MinIO resume archive
    let resume_archive = match &config.archive {
        Some(archive) => {
            info!("Resume archive enabled (bucket: {})", archive.bucket);
            Some(ResumeArchive::connect(archive).await)
        }
        None => None,
    };

    let state = AppState {
        candidates,
        parser,
        extractor: Arc::new(PdfTextExtractor),
        ranker,
        resume_archive,
        max_upload_bytes: config.max_upload_bytes,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

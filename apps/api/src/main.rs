mod config;
mod errors;
mod extraction;
mod routes;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::{build_router, cors_layer};
use crate::screening::engine::ScreeningEngine;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on invalid values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Skill vocabulary is fixed for the lifetime of the process
    let engine = Arc::new(ScreeningEngine::new(config.load_vocabulary()?));
    let skill_count = engine.vocabulary().len();
    match &config.skills_file {
        Some(path) => info!(
            "Skill vocabulary loaded from {} ({skill_count} skills)",
            path.display()
        ),
        None => info!("Using built-in skill vocabulary ({skill_count} skills)"),
    }

    let cors = cors_layer(&config.allowed_origins)?;
    info!("CORS origins: {}", config.allowed_origins.join(", "));

    // Build app state
    let state = AppState {
        config: config.clone(),
        engine,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! InnerSight API Server
//!
//! HTTP presentation layer for the InnerSight risk engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    INNERSIGHT SERVER                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────────┐  ┌─────────────────────┐  │
//! │  │  Router   │  │  Validation   │  │  Response rendering │  │
//! │  │  (Axum)   │  │  (validator)  │  │  (title, headline)  │  │
//! │  └─────┬─────┘  └───────┬───────┘  └──────────┬──────────┘  │
//! │        └────────────────┼─────────────────────┘             │
//! │                         ▼                                   │
//! │               ┌───────────────────┐                         │
//! │               │ innersight-core   │  Arc<ModelContext>      │
//! │               └───────────────────┘  (loaded once)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;


use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use innersight_core::constants::APP_NAME;
use innersight_core::logic::model::{load_context, ArtifactPaths};
use innersight_core::ModelContext;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    // Initialize logging (JSON lines in production)
    let production = config.is_production();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "innersight_server=debug,innersight_core=info,tower_http=debug".into()
            }),
        )
        .with(production.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!production).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("{} server starting ({})", APP_NAME, config.environment);
    tracing::info!("Artifacts: {}", config.artifacts_dir.display());

    // Artifacts are loaded exactly once; any failure aborts startup
    let paths = ArtifactPaths::new(config.artifacts_dir.clone());
    let context = load_context(&paths, config.model_backend)
        .with_context(|| format!("loading model artifacts from {}", paths.dir().display()))?;

    // Build application state
    let state = AppState {
        context: Arc::new(context),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<ModelContext>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/model", get(handlers::model::info))
        .route("/api/v1/features", post(handlers::assessments::derive_features))
        .route("/api/v1/assessments", post(handlers::assessments::create))
        .route("/api/v1/explanation", get(handlers::explanation::image))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

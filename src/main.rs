//! BrightPath Predictor Server
//!
//! Authenticated dashboard that predicts a student's letter grade from
//! demographic and behavioral attributes using a pre-trained classifier.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  BRIGHTPATH PREDICTOR                    │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌──────────────────────┐ │
//! │  │  Dashboard│  │  Auth     │  │  Prediction Pipeline │ │
//! │  │  + API    │  │  (Basic)  │  │  assemble → scale →  │ │
//! │  │  (Axum)   │  │           │  │  classify → grade    │ │
//! │  └─────┬─────┘  └─────┬─────┘  └──────────┬───────────┘ │
//! │        └──────────────┼────────────────────┘             │
//! │                       ▼                                  │
//! │          ┌─────────────────────────┐                    │
//! │          │  ONNX model + scaler    │  (read-only,       │
//! │          │  artifacts on disk      │   loaded once)     │
//! │          └─────────────────────────┘                    │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod pipeline;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pipeline::Predictor;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brightpath_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("BrightPath Predictor starting...");
    tracing::info!(
        "Model: {} | Scaler: {}",
        config.model_path,
        config.scaler_path
    );

    anyhow::ensure!(
        !config.users.is_empty(),
        "no valid credentials configured; set BRIGHTPATH_USERS"
    );

    if config.is_production() {
        tracing::info!("Running in production mode");
    }

    // Load artifacts. Fail fast: a server without a classifier must not come
    // up and silently refuse predictions later.
    let predictor = Predictor::load(&config.model_path, &config.scaler_path)
        .context("loading prediction artifacts")?;

    // Build application state
    let state = AppState {
        config: config.clone(),
        predictor: Arc::new(predictor),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("binding listener")?;
    axum::serve(listener, app).await.context("serving")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub predictor: Arc<Predictor>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new().route("/health", get(handlers::health::check));

    // Everything user-facing sits behind the credential set
    let gated_routes = Router::new()
        .route("/", get(handlers::dashboard::page))
        .route("/api/v1/predict", post(handlers::predict::predict))
        .route(
            "/api/v1/interventions/download",
            get(handlers::download::intervention_list),
        )
        .route("/api/v1/model/status", get(handlers::status::model_status))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_basic_auth,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .merge(gated_routes)
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

//! Echelor HTTP Server
//!
//! Axum-based JSON API over the Echelor core: dashboard metrics and alerts,
//! scenario planning, and the LLM assistant. Markup is left to whatever
//! presentation layer is served from `static/`.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::LlmProvider;
use agent_runtime::OpenAiProvider;
use echelor::{
    AssistantGateway, CancellationToken, EchelorConfig, MetricsEngine, StaticSnapshotSource,
};

use crate::handlers::{ask, get_dashboard, health_check, post_dashboard, scenario, summary};
use crate::state::AppState;

fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(health_check))
        // Dashboard
        .route("/api/dashboard", get(get_dashboard).post(post_dashboard))
        .route("/api/scenario", post(scenario))
        // Assistant
        .route("/api/summary", post(summary))
        .route("/api/ask", post(ask))
        // Presentation layer
        .fallback_service(ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EchelorConfig::from_env();
    tracing::info!(
        low_cash = %config.thresholds.low_cash_threshold,
        high_burn = %config.thresholds.high_burn_threshold,
        "Alert thresholds"
    );

    // Initialize LLM provider
    let assistant = match OpenAiProvider::from_env() {
        Ok(provider) => {
            let provider: Arc<dyn LlmProvider> = Arc::new(provider);
            match provider.health_check().await {
                Ok(true) => tracing::info!("✓ Connected to {}", provider.info().endpoint),
                Ok(false) | Err(_) => tracing::warn!(
                    "⚠ {} not reachable - assistant calls will fail",
                    provider.info().endpoint
                ),
            }
            tracing::info!(
                model = %config.assistant.model,
                max_concurrent = config.assistant.max_concurrent_requests,
                "Assistant enabled"
            );
            Some(Arc::new(AssistantGateway::new(provider, config.assistant.clone())))
        }
        Err(e) => {
            tracing::warn!("⚠ Assistant disabled: {}", e);
            tracing::warn!("  Set OPENAI_API_KEY in .env");
            None
        }
    };

    let shutdown = CancellationToken::new();

    // Build application state
    let state = AppState {
        engine: Arc::new(MetricsEngine::new(config.thresholds.clone())),
        source: Arc::new(StaticSnapshotSource::demo()),
        assistant,
        shutdown: shutdown.clone(),
    };

    let app = router(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Echelor server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health         - Health check");
    tracing::info!("  GET  /api/dashboard  - Metrics, alerts and trend");
    tracing::info!("  POST /api/dashboard  - Same, for a supplied snapshot");
    tracing::info!("  POST /api/scenario   - What-if burn rate and runway");
    tracing::info!("  POST /api/summary    - Assistant summary");
    tracing::info!("  POST /api/ask        - Ask the assistant");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down");
            shutdown.cancel();
        })
        .await?;

    Ok(())
}

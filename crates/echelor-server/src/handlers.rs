//! HTTP Handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use echelor::{
    AssistantGateway, Dashboard, DerivedMetrics, FinanceError, FinancialSnapshot, ScenarioInput,
    ScenarioOutcome,
};

use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub snapshot_source: String,
    pub assistant_configured: bool,
    pub assistant_reachable: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioRequest {
    #[serde(flatten)]
    pub input: ScenarioInput,
    /// Run against this snapshot instead of the configured source
    #[serde(default)]
    pub snapshot: Option<FinancialSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct ScenarioResponse {
    pub current: DerivedMetrics,
    pub scenario: ScenarioOutcome,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub snapshot: Option<FinancialSnapshot>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub snapshot: Option<FinancialSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub message: String,
    pub model: String,
}

// ============================================================================
// Helpers
// ============================================================================

fn error_response(err: FinanceError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        FinanceError::InvalidSnapshot(_) | FinanceError::InvalidQuestion => StatusCode::BAD_REQUEST,
        FinanceError::AssistantQuotaExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
        FinanceError::AssistantUnavailable(_) => StatusCode::BAD_GATEWAY,
        FinanceError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        FinanceError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("Request failed: {}", err);
    } else {
        tracing::warn!("Request rejected: {}", err);
    }

    (
        status,
        Json(ErrorResponse {
            error: err.user_message(),
            code: err.code().into(),
        }),
    )
}

/// Caller-supplied snapshot, or a fresh one from the source
async fn resolve_snapshot(
    state: &AppState,
    supplied: Option<FinancialSnapshot>,
) -> Result<FinancialSnapshot, (StatusCode, Json<ErrorResponse>)> {
    match supplied {
        Some(snapshot) => Ok(snapshot),
        None => state.source.fetch().await.map_err(error_response),
    }
}

async fn current_metrics(
    state: &AppState,
    supplied: Option<FinancialSnapshot>,
) -> Result<DerivedMetrics, (StatusCode, Json<ErrorResponse>)> {
    let snapshot = resolve_snapshot(state, supplied).await?;
    state.engine.compute_metrics(&snapshot).map_err(error_response)
}

fn assistant(state: &AppState) -> Result<&AssistantGateway, (StatusCode, Json<ErrorResponse>)> {
    state.assistant.as_deref().ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Assistant not configured".into(),
                code: "ASSISTANT_DISABLED".into(),
            }),
        )
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let assistant_reachable = match &state.assistant {
        Some(gateway) => gateway.provider().health_check().await.unwrap_or(false),
        None => false,
    };

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        snapshot_source: state.source.name().to_string(),
        assistant_configured: state.assistant.is_some(),
        assistant_reachable,
    })
}

/// Dashboard for the configured snapshot source
pub async fn get_dashboard(State(state): State<AppState>) -> ApiResult<Dashboard> {
    let snapshot = resolve_snapshot(&state, None).await?;
    state.engine.dashboard(&snapshot).map(Json).map_err(error_response)
}

/// Dashboard for a caller-supplied snapshot
pub async fn post_dashboard(
    State(state): State<AppState>,
    Json(snapshot): Json<FinancialSnapshot>,
) -> ApiResult<Dashboard> {
    state.engine.dashboard(&snapshot).map(Json).map_err(error_response)
}

/// What-if burn rate and runway
pub async fn scenario(
    State(state): State<AppState>,
    Json(payload): Json<ScenarioRequest>,
) -> ApiResult<ScenarioResponse> {
    let current = current_metrics(&state, payload.snapshot).await?;
    let scenario = current.scenario(payload.input).map_err(error_response)?;

    Ok(Json(ScenarioResponse { current, scenario }))
}

/// Narrative summary of the current metrics
pub async fn summary(
    State(state): State<AppState>,
    Json(payload): Json<SummaryRequest>,
) -> ApiResult<AssistantResponse> {
    let gateway = assistant(&state)?;
    let metrics = current_metrics(&state, payload.snapshot).await?;

    let message = gateway
        .summarize_with_cancel(&metrics, &state.shutdown.child_token())
        .await
        .map_err(error_response)?;

    Ok(Json(AssistantResponse {
        message,
        model: gateway.config().model.clone(),
    }))
}

/// Answer a question about the current metrics
pub async fn ask(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> ApiResult<AssistantResponse> {
    let gateway = assistant(&state)?;
    let metrics = current_metrics(&state, payload.snapshot).await?;

    let message = gateway
        .answer_with_cancel(&metrics, &payload.question, &state.shutdown.child_token())
        .await
        .map_err(error_response)?;

    Ok(Json(AssistantResponse {
        message,
        model: gateway.config().model.clone(),
    }))
}

//! API handlers for the essay gateway
//!
//! Provides REST endpoints for:
//! - Remote essay analysis (`POST /api/analyze-essay`)
//! - Local heuristic analysis (`POST /api/heuristic-analysis`)
//! - Health and service metadata

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use essay_core::{
    AnalysisError, AnalysisResult, EssayAnalysisResponse, EssayAnalyzer, EssayText,
    HeuristicAnalyzer,
};

use crate::error::ApiError;
use crate::AppState;

pub const SERVICE_NAME: &str = "essay-gateway";

/// Health check response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
    pub backend_url: String,
}

/// Handler: GET /api/health
///
/// Reports the gateway only; the backend is not probed.
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: SERVICE_NAME,
        backend_url: state.remote.backend_url().to_string(),
    })
}

/// Handler: GET /
pub async fn handle_root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Essay Analyzer API",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "analyze": "/api/analyze-essay",
            "heuristic": "/api/heuristic-analysis",
            "health": "/api/health",
        },
        "backendUrl": state.remote.backend_url(),
    }))
}

/// Handler: POST /api/analyze-essay
///
/// Body: `{ "text": string }`. Forwards the essay to the remote analyzer and
/// returns its validated feedback.
pub async fn handle_analyze_essay(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<EssayAnalysisResponse>, ApiError> {
    let Json(body) = body?;
    let text = EssayText::from_json(body.get("text"))?;

    info!(
        "Starting essay analysis via remote backend ({} chars)",
        text.char_count()
    );
    let response = state.remote.analyze(&text).await?;
    info!(
        "Essay analysis completed successfully: overall_score={}",
        response.overall_score
    );

    Ok(Json(response))
}

/// Handler: POST /api/heuristic-analysis
///
/// Body: `{ "text": string, "seed"?: integer }`. Scores the essay locally;
/// a seed makes the result reproducible.
pub async fn handle_heuristic_analysis(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(body) = body?;
    let text = EssayText::from_json(body.get("text"))?;

    let analyzer = match body.get("seed") {
        None | Some(Value::Null) => HeuristicAnalyzer::new(),
        Some(seed) => HeuristicAnalyzer::with_seed(seed.as_u64().ok_or_else(|| {
            AnalysisError::invalid_input("Invalid request: seed must be a non-negative integer")
        })?),
    };

    debug!(
        "Heuristic analysis: chars={}, seed={:?}",
        text.char_count(),
        analyzer.seed()
    );
    let result = analyzer.analyze(&text).await?;
    info!(
        "Heuristic analysis completed: overall_score={}, words={}",
        result.overall_score, result.essay_length
    );

    Ok(Json(result))
}

// src/web/api.rs
// REST handlers for the analysis API

use crate::analyzer::AnalysisRequest;
use crate::error::MoodscopeError;
use crate::llm::OutputFormat;
use crate::mood::{MoodCoordinate, SCALE_MIDPOINT};
use crate::web::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;

/// Health check
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub description: String,
    #[serde(default = "default_level")]
    pub arousal: i8,
    #[serde(default = "default_level")]
    pub valence: i8,
    #[serde(default)]
    pub context_note: Option<String>,
    /// Request the structured report instead of the prose debrief
    #[serde(default)]
    pub structured: bool,
}

fn default_level() -> i8 {
    SCALE_MIDPOINT
}

/// Run one analysis. Service failures come back as an inline message the
/// page can show; the caller may manually resubmit.
pub async fn analyze(
    State(state): State<AppState>,
    Json(params): Json<AnalyzeParams>,
) -> Response {
    let request = AnalysisRequest {
        description: params.description,
        coordinate: MoodCoordinate::new(params.arousal, params.valence),
        context_note: params.context_note,
        format: if params.structured {
            OutputFormat::Json
        } else {
            OutputFormat::Prose
        },
    };

    match state.analyzer.analyze(&request).await {
        Ok(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        Err(err) => {
            let status = match err {
                MoodscopeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, Json(json!({ "message": err.to_user_string() }))).into_response()
        }
    }
}

// src/analyzer.rs
// Orchestrates one analysis: classify, assemble prompt, call, interpret

use crate::analysis::{ResponseDigest, WellnessReport, digest_prose, parse_report};
use crate::error::{MoodscopeError, Result};
use crate::llm::{LlmClient, OutputFormat};
use crate::mood::{MoodCoordinate, Quadrant};
use crate::prompt::{PromptBuilder, compose_user_context};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Inputs for one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub description: String,
    pub coordinate: MoodCoordinate,
    pub context_note: Option<String>,
    pub format: OutputFormat,
}

/// The interpreted reply, in whichever shape was requested
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "body", rename_all = "lowercase")]
pub enum AnalysisBody {
    Prose(ResponseDigest),
    Report(WellnessReport),
}

/// Result of one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub quadrant: Quadrant,
    #[serde(flatten)]
    pub body: AnalysisBody,
    pub model: String,
    pub duration_ms: u64,
}

/// Drives the classify -> prompt -> generate -> interpret pipeline.
///
/// Owns the provider client; at most one outbound call per `analyze`
/// invocation, which blocks until the reply or error arrives. Service
/// failures are returned to the caller for display, never retried here.
pub struct Analyzer {
    client: Arc<dyn LlmClient>,
}

impl Analyzer {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Analysis> {
        if request.description.trim().is_empty() {
            return Err(MoodscopeError::InvalidInput(
                "describe your current state first".to_string(),
            ));
        }

        let quadrant = request.coordinate.quadrant();
        info!(
            quadrant = %quadrant,
            arousal = request.coordinate.arousal(),
            valence = request.coordinate.valence(),
            "Classified mood coordinate"
        );

        let builder = match request.format {
            OutputFormat::Prose => PromptBuilder::for_debrief(),
            OutputFormat::Json => PromptBuilder::for_structured_report(),
        };

        let user_context = compose_user_context(
            &request.description,
            quadrant,
            request.context_note.as_deref(),
        );

        let outcome = self
            .client
            .generate(builder.build_messages(user_context), request.format)
            .await?;

        let body = match request.format {
            OutputFormat::Json => AnalysisBody::Report(parse_report(&outcome.text)?),
            OutputFormat::Prose => AnalysisBody::Prose(digest_prose(&outcome.text)),
        };

        info!(
            request_id = %outcome.request_id,
            quadrant = %quadrant,
            duration_ms = outcome.duration_ms,
            "Analysis complete"
        );

        Ok(Analysis {
            quadrant,
            body,
            model: self.client.model_name(),
            duration_ms: outcome.duration_ms,
        })
    }
}

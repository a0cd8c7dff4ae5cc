// src/analysis/report.rs
// Structured report contract and validation

use crate::error::{MoodscopeError, Result};
use serde::{Deserialize, Serialize};

/// One estimated substance level, as percentages of a healthy baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEstimate {
    pub name: String,
    pub current: u32,
    pub target: u32,
}

/// The declared structured-output contract.
///
/// Field list must stay in sync with `PromptBuilder::for_structured_report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessReport {
    pub levels: Vec<LevelEstimate>,
    pub mood: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub summary: String,
    #[serde(default)]
    pub guidance: String,
}

/// Parse and validate a structured reply.
///
/// Strict: any shape violation is an error surfaced to the user; there is
/// no partial-report fallback.
pub fn parse_report(raw: &str) -> Result<WellnessReport> {
    let report: WellnessReport = serde_json::from_str(strip_code_fence(raw)).map_err(|e| {
        MoodscopeError::MalformedResponse(format!("reply is not a valid report: {}", e))
    })?;
    validate_report(&report)?;
    Ok(report)
}

/// Enforce the declared shape of a parsed report
pub fn validate_report(report: &WellnessReport) -> Result<()> {
    if report.summary.trim().is_empty() {
        return Err(MoodscopeError::MalformedResponse(
            "summary cannot be empty".to_string(),
        ));
    }

    if report.mood.trim().is_empty() {
        return Err(MoodscopeError::MalformedResponse(
            "mood label cannot be empty".to_string(),
        ));
    }

    for level in &report.levels {
        if level.name.trim().is_empty() {
            return Err(MoodscopeError::MalformedResponse(
                "level entry has an empty name".to_string(),
            ));
        }
        if level.current > 100 || level.target > 100 {
            return Err(MoodscopeError::MalformedResponse(format!(
                "level '{}' outside 0-100: current={}, target={}",
                level.name, level.current, level.target
            )));
        }
    }

    Ok(())
}

/// Models occasionally wrap JSON in a markdown fence despite the contract;
/// strip one outer fence before parsing.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

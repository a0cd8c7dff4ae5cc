// src/llm/mod.rs
// Analysis provider client (Gemini)

pub mod gemini;
mod http_client;
mod provider;

pub use gemini::GeminiClient;
pub use http_client::LlmHttpClient;
pub use provider::LlmClient;

use serde::{Deserialize, Serialize};

/// A single chat message in provider-neutral form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Requested shape of the model's reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Free prose, interpreted by the line scanner
    Prose,
    /// JSON constrained to the declared report schema
    Json,
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Normalized result of one generation call
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub request_id: String,
    pub text: String,
    pub usage: Option<Usage>,
    pub duration_ms: u64,
}

// src/llm/gemini/client.rs
// Google Gemini API client (non-streaming)
// Authenticates via query-string key, not Bearer header

use crate::error::{MoodscopeError, Result};
use crate::http::create_shared_client;
use crate::llm::gemini::types::{
    GeminiContent, GeminiPart, GeminiRequest, GeminiResponse, GenerationConfig,
};
use crate::llm::http_client::LlmHttpClient;
use crate::llm::provider::LlmClient;
use crate::llm::{GenerationOutcome, Message, OutputFormat, Usage};
use async_trait::async_trait;
use std::time::Instant;
use tracing::{Span, debug, info, instrument};
use uuid::Uuid;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model - the flash tier the hosted app pins
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Google Gemini API client
pub struct GeminiClient {
    api_key: String,
    model: String,
    http: LlmHttpClient,
    temperature: f32,
}

impl GeminiClient {
    /// Create a new Gemini client with the default model
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL.to_string())
    }

    /// Create a new Gemini client with a custom model
    pub fn with_model(api_key: String, model: String) -> Self {
        Self::with_http_client(api_key, model, create_shared_client())
    }

    /// Create a new Gemini client with a shared HTTP client
    pub fn with_http_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            api_key,
            model,
            http: LlmHttpClient::from_client(client),
            temperature: 0.7,
        }
    }

    /// Convert provider-neutral messages, separating the system instruction
    fn convert_messages(messages: &[Message]) -> (Option<GeminiContent>, Vec<GeminiContent>) {
        let mut system_instruction: Option<GeminiContent> = None;
        let mut contents: Vec<GeminiContent> = Vec::new();

        for msg in messages {
            let content = GeminiContent {
                // system_instruction uses the user role
                role: if msg.role == "assistant" {
                    "model".to_string()
                } else {
                    "user".to_string()
                },
                parts: vec![GeminiPart {
                    text: msg.content.clone(),
                }],
            };

            if msg.role == "system" {
                system_instruction = Some(content);
            } else {
                contents.push(content);
            }
        }

        (system_instruction, contents)
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: &GeminiResponse) -> Option<String> {
    let candidate = response.candidates.as_ref()?.first()?;
    let content = candidate.content.as_ref()?;

    let text: String = content
        .parts
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("");

    if text.trim().is_empty() { None } else { Some(text) }
}

#[async_trait]
impl LlmClient for GeminiClient {
    fn model_name(&self) -> String {
        self.model.clone()
    }

    #[instrument(skip(self, messages), fields(request_id, model = %self.model, message_count = messages.len()))]
    async fn generate(
        &self,
        messages: Vec<Message>,
        format: OutputFormat,
    ) -> Result<GenerationOutcome> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();

        Span::current().record("request_id", &request_id);

        let structured = format == OutputFormat::Json;
        info!(
            request_id = %request_id,
            message_count = messages.len(),
            model = %self.model,
            structured = structured,
            "Starting Gemini generation request"
        );

        let (system_instruction, contents) = Self::convert_messages(&messages);

        let request = GeminiRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
                temperature: Some(self.temperature),
                response_mime_type: match format {
                    OutputFormat::Json => Some("application/json".to_string()),
                    OutputFormat::Prose => None,
                },
            },
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        );

        let body = serde_json::to_string(&request)?;
        debug!(request_id = %request_id, "Gemini request: {}", body);

        let response_body = self
            .http
            .execute_request_with_retry(&request_id, body, |client, body| {
                client
                    .post(&url)
                    .header("Content-Type", "application/json")
                    .body(body)
            })
            .await?;

        let duration_ms = start_time.elapsed().as_millis() as u64;

        let data: GeminiResponse = serde_json::from_str(&response_body).map_err(|e| {
            MoodscopeError::MalformedResponse(format!("failed to parse Gemini response: {}", e))
        })?;

        let text = extract_text(&data).ok_or_else(|| {
            MoodscopeError::MalformedResponse("model returned no usable text".to_string())
        })?;

        let usage = data.usage_metadata.map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count.unwrap_or(0),
            total_tokens: u.total_token_count,
        });

        if let Some(ref u) = usage {
            info!(
                request_id = %request_id,
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "Gemini usage"
            );
        }

        info!(
            request_id = %request_id,
            duration_ms = duration_ms,
            response_chars = text.len(),
            "Gemini generation complete"
        );

        Ok(GenerationOutcome {
            request_id,
            text,
            usage,
            duration_ms,
        })
    }
}

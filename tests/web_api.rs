// tests/web_api.rs
// HTTP surface tests via tower::ServiceExt::oneshot

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use moodscope::analyzer::Analyzer;
use moodscope::error::{MoodscopeError, Result};
use moodscope::llm::{GenerationOutcome, LlmClient, Message, OutputFormat};
use moodscope::web::{self, state::AppState};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

struct CannedClient {
    text: String,
}

#[async_trait]
impl LlmClient for CannedClient {
    async fn generate(
        &self,
        _messages: Vec<Message>,
        _format: OutputFormat,
    ) -> Result<GenerationOutcome> {
        Ok(GenerationOutcome {
            request_id: "test".to_string(),
            text: self.text.clone(),
            usage: None,
            duration_ms: 2,
        })
    }

    fn model_name(&self) -> String {
        "canned-model".to_string()
    }
}

struct RateLimitedClient;

#[async_trait]
impl LlmClient for RateLimitedClient {
    async fn generate(
        &self,
        _messages: Vec<Message>,
        _format: OutputFormat,
    ) -> Result<GenerationOutcome> {
        Err(MoodscopeError::Llm(
            "API error 429: quota exceeded".to_string(),
        ))
    }

    fn model_name(&self) -> String {
        "canned-model".to_string()
    }
}

fn router_with(client: Arc<dyn LlmClient>) -> axum::Router {
    let analyzer = Arc::new(Analyzer::new(client));
    web::create_router(AppState::new(analyzer))
}

fn analyze_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = router_with(Arc::new(CannedClient {
        text: "unused".to_string(),
    }));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn analyze_returns_quadrant_and_prose_body() {
    let app = router_with(Arc::new(CannedClient {
        text: "Dopamine: 30, 70\n---detail---\nmechanism text".to_string(),
    }));

    let response = app
        .oneshot(analyze_request(json!({
            "description": "restless and snappy",
            "arousal": 5,
            "valence": 1
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["quadrant"], "agitated");
    assert_eq!(body["kind"], "prose");
    assert_eq!(body["body"]["readings"][0]["name"], "Dopamine");
    assert_eq!(body["body"]["detail"], "mechanism text");
    assert_eq!(body["model"], "canned-model");
}

#[tokio::test]
async fn analyze_defaults_sliders_to_midpoint() {
    let app = router_with(Arc::new(CannedClient {
        text: "a quiet day".to_string(),
    }));

    let response = app
        .oneshot(analyze_request(json!({ "description": "nothing special" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    // Double midpoint reads as low arousal, positive valence
    assert_eq!(body["quadrant"], "serene");
}

#[tokio::test]
async fn empty_description_is_bad_request() {
    let app = router_with(Arc::new(CannedClient {
        text: "unused".to_string(),
    }));

    let response = app
        .oneshot(analyze_request(json!({ "description": "   " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("describe"));
}

#[tokio::test]
async fn rate_limited_service_shows_custom_message() {
    let app = router_with(Arc::new(RateLimitedClient));

    let response = app
        .oneshot(analyze_request(json!({ "description": "tired" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("rate limiting"));
}

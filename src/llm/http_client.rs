// src/llm/http_client.rs
// Shared HTTP execution with bounded retry for the provider client

use crate::error::{MoodscopeError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

/// Default maximum retry attempts for transient failures
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default base backoff duration between retries (doubles each attempt)
const DEFAULT_BASE_BACKOFF_SECS: u64 = 1;

/// HTTP execution wrapper used by the provider client
pub struct LlmHttpClient {
    client: Client,
    pub max_attempts: u32,
    pub base_backoff: Duration,
}

impl LlmHttpClient {
    /// Create from an existing reqwest::Client (the shared pooled client)
    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_backoff: Duration::from_secs(DEFAULT_BASE_BACKOFF_SECS),
        }
    }

    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Execute an HTTP request with retry logic using a custom request builder.
    ///
    /// The `build_request` closure is called on each attempt with the reqwest
    /// Client and the request body, letting callers set URL, headers, and auth.
    /// Retries 429 and 5xx responses plus connect/timeout transport failures;
    /// other errors return immediately because the request may have been
    /// processed.
    pub async fn execute_request_with_retry<F>(
        &self,
        request_id: &str,
        body: String,
        build_request: F,
    ) -> Result<String>
    where
        F: Fn(&Client, String) -> reqwest::RequestBuilder,
    {
        let mut attempts = 0;
        let mut backoff = self.base_backoff;

        loop {
            let response_result = build_request(&self.client, body.clone()).send().await;

            match response_result {
                Ok(response) => {
                    let status = response.status();
                    if !status.is_success() {
                        let error_body = response.text().await.unwrap_or_default();

                        if attempts < self.max_attempts
                            && (status.as_u16() == 429 || status.is_server_error())
                        {
                            warn!(
                                request_id = %request_id,
                                status = %status,
                                error = %error_body,
                                "Transient error, retrying in {:?}...",
                                backoff
                            );
                            tokio::time::sleep(backoff).await;
                            attempts += 1;
                            backoff *= 2;
                            continue;
                        }

                        return Err(MoodscopeError::Llm(format!(
                            "API error {}: {}",
                            status, error_body
                        )));
                    }

                    return Ok(response.text().await?);
                }
                Err(e) => {
                    if attempts < self.max_attempts && (e.is_connect() || e.is_timeout()) {
                        warn!(
                            request_id = %request_id,
                            error = %e,
                            "Request failed (connect/timeout), retrying in {:?}...",
                            backoff
                        );
                        tokio::time::sleep(backoff).await;
                        attempts += 1;
                        backoff *= 2;
                        continue;
                    }
                    return Err(MoodscopeError::Llm(format!(
                        "request failed after retries: {}",
                        e
                    )));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Construction
    // ========================================================================

    #[test]
    fn test_from_client_defaults() {
        let client = LlmHttpClient::from_client(Client::new());
        assert_eq!(client.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(
            client.base_backoff,
            Duration::from_secs(DEFAULT_BASE_BACKOFF_SECS)
        );
    }

    #[test]
    fn test_inner_returns_client() {
        let client = LlmHttpClient::from_client(Client::new());
        let _inner = client.inner();
    }

    // ========================================================================
    // Retry behavior (requires tokio + actual HTTP)
    // ========================================================================

    #[tokio::test]
    async fn test_connection_refused_surfaces_error() {
        let client = LlmHttpClient {
            client: Client::new(),
            max_attempts: 1,
            base_backoff: Duration::from_millis(10),
        };
        let result = client
            .execute_request_with_retry("test", "{}".into(), |c, body| {
                c.post("http://127.0.0.1:1")
                    .header("Content-Type", "application/json")
                    .body(body)
            })
            .await;
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(
            err.contains("failed") || err.contains("error") || err.contains("connect"),
            "Expected connection error, got: {}",
            err
        );
    }
}

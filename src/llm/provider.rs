// src/llm/provider.rs
// Provider abstraction - the seam between the pipeline and the hosted service

use crate::error::Result;
use async_trait::async_trait;

use super::{GenerationOutcome, Message, OutputFormat};

/// Trait for analysis provider clients.
///
/// One blocking outbound call per invocation; implementations own their
/// transport-level retry policy, callers never retry.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one generation request and wait for the full reply
    async fn generate(
        &self,
        messages: Vec<Message>,
        format: OutputFormat,
    ) -> Result<GenerationOutcome>;

    /// Model identifier used for this client
    fn model_name(&self) -> String;
}

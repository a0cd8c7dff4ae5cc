// src/web/state.rs
// Shared state for the HTTP surface

use crate::analyzer::Analyzer;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The analysis pipeline, shared across requests
    pub analyzer: Arc<Analyzer>,
}

impl AppState {
    pub fn new(analyzer: Arc<Analyzer>) -> Self {
        Self { analyzer }
    }
}

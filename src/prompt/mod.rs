// src/prompt/mod.rs
// Prompt assembly for the analysis provider

mod builder;

pub use builder::{PromptBuilder, compose_user_context};

// src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use crate::error::{MoodscopeError, Result};
use tracing::{debug, info, warn};

/// Default Gemini model, matching what the hosted app pins
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// API keys loaded from environment variables
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// Gemini/Google API key (GEMINI_API_KEY, falling back to GOOGLE_API_KEY)
    pub gemini: Option<String>,
}

impl ApiKeys {
    /// Load API keys from environment variables (single source of truth).
    ///
    /// Precedence: `GEMINI_API_KEY`, then `GOOGLE_API_KEY`. Set
    /// `MOODSCOPE_DISABLE_LLM=1` to suppress the key entirely (forces the
    /// offline paths, useful in tests).
    pub fn from_env() -> Self {
        if parse_bool_env("MOODSCOPE_DISABLE_LLM").unwrap_or(false) {
            info!("MOODSCOPE_DISABLE_LLM is set - analysis provider disabled");
            return Self { gemini: None };
        }

        let gemini = Self::read_key("GEMINI_API_KEY").or_else(|| Self::read_key("GOOGLE_API_KEY"));

        let keys = Self { gemini };
        keys.log_status();
        keys
    }

    /// Read a single API key from environment, filtering empty values
    fn read_key(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|k| !k.trim().is_empty())
    }

    /// Check if the analysis provider is available
    pub fn has_llm_provider(&self) -> bool {
        self.gemini.is_some()
    }

    /// Get the Gemini key or a fatal, instructional configuration error.
    ///
    /// Called once at startup of any command that talks to the provider;
    /// absence halts further interaction.
    pub fn require_gemini(&self) -> Result<&str> {
        self.gemini.as_deref().ok_or_else(|| {
            MoodscopeError::Config(
                "GEMINI_API_KEY is not set. Export GEMINI_API_KEY (or GOOGLE_API_KEY) \
                 and run again."
                    .to_string(),
            )
        })
    }

    /// Log which API keys are available (without exposing values)
    fn log_status(&self) {
        if self.gemini.is_some() {
            debug!("Gemini API key loaded");
        } else {
            warn!("No API key configured - analysis will be unavailable");
        }
    }
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Environment configuration - all env vars in one place
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// API keys for the analysis provider
    pub api_keys: ApiKeys,
    /// Model override (MOODSCOPE_MODEL)
    pub model: String,
    /// Bind host for the HTTP surface (MOODSCOPE_HOST)
    pub host: String,
    /// Bind port for the HTTP surface (MOODSCOPE_PORT)
    pub port: u16,
}

impl EnvConfig {
    /// Load all environment configuration (call once at startup)
    pub fn load() -> Self {
        info!("Loading environment configuration");

        Self {
            api_keys: ApiKeys::from_env(),
            model: std::env::var("MOODSCOPE_MODEL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            host: std::env::var("MOODSCOPE_HOST")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "127.0.0.1".to_string()),
            port: std::env::var("MOODSCOPE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3400),
        }
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if !self.api_keys.has_llm_provider() {
            validation.add_error(
                "No API key configured. Set GEMINI_API_KEY or GOOGLE_API_KEY.",
            );
        }

        if !self.model.starts_with("gemini-") {
            validation.add_warning(format!(
                "Model '{}' does not look like a Gemini model id",
                self.model
            ));
        }

        validation
    }
}

fn parse_bool_env(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?.to_lowercase();
    match value.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_keys_default_absent() {
        let keys = ApiKeys::default();
        assert!(!keys.has_llm_provider());
        assert!(keys.require_gemini().is_err());
    }

    #[test]
    fn test_require_gemini_present() {
        let keys = ApiKeys {
            gemini: Some("test-key".to_string()),
        };
        assert!(keys.has_llm_provider());
        assert_eq!(keys.require_gemini().unwrap(), "test-key");
    }

    #[test]
    fn test_require_gemini_message_is_instructional() {
        let keys = ApiKeys::default();
        let err = keys.require_gemini().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("GEMINI_API_KEY"));
        assert!(msg.contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn test_validation_no_keys_is_fatal() {
        let config = EnvConfig {
            api_keys: ApiKeys::default(),
            model: DEFAULT_MODEL.to_string(),
            host: "127.0.0.1".to_string(),
            port: 3400,
        };

        let validation = config.validate();
        assert!(!validation.is_valid());
        assert!(validation.report().contains("Errors:"));
    }

    #[test]
    fn test_validation_odd_model_warns() {
        let config = EnvConfig {
            api_keys: ApiKeys {
                gemini: Some("k".to_string()),
            },
            model: "gpt-4.1".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3400,
        };

        let validation = config.validate();
        assert!(validation.is_valid());
        assert_eq!(validation.warnings.len(), 1);
    }

    #[test]
    fn test_bind_address() {
        let config = EnvConfig {
            api_keys: ApiKeys::default(),
            model: DEFAULT_MODEL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_validation_report_ok() {
        let validation = ConfigValidation::new();
        assert!(validation.is_valid());
        assert_eq!(validation.report(), "Configuration OK");
    }
}

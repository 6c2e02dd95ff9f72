//! Raw TOML configuration data types
//!
//! These structs mirror the config file layout one-to-one. Conversions into
//! application-layer value types live at the bottom of `FileConfig`.

use mabrur_application::{RetrievalConfig, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("retry.max_attempts cannot be 0")]
    ZeroAttempts,

    #[error("retry.attempt_timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("retrieval.limit cannot be 0")]
    ZeroLimit,

    #[error("provider.model cannot be empty")]
    EmptyModelName,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Socket address to bind, e.g. `127.0.0.1:3000`
    pub bind: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// OpenAI-compatible chat-completions provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1500,
            temperature: 0.7,
            api_key_env: "PROVIDER_API_KEY".to_string(),
        }
    }
}

impl FileProviderConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// Blank values count as missing.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub attempt_timeout_seconds: u64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            initial_delay_ms: policy.initial_delay.as_millis() as u64,
            attempt_timeout_seconds: policy.attempt_timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    pub max_terms: usize,
    pub min_term_chars: usize,
    pub limit: usize,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        let config = RetrievalConfig::default();
        Self {
            max_terms: config.max_terms,
            min_term_chars: config.min_term_chars,
            limit: config.limit,
        }
    }
}

/// Knowledge store location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileKnowledgeConfig {
    /// SQLite database path. `None` uses a seeded in-memory store.
    pub database: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving one event per answered request
    pub conversation_log: Option<String>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: FileServerConfig,
    pub provider: FileProviderConfig,
    pub retry: FileRetryConfig,
    pub retrieval: FileRetrievalConfig,
    pub knowledge: FileKnowledgeConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigValidationError::ZeroAttempts);
        }
        if self.retry.attempt_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.retrieval.limit == 0 {
            return Err(ConfigValidationError::ZeroLimit);
        }
        if self.provider.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_attempts(self.retry.max_attempts)
            .with_initial_delay(Duration::from_millis(self.retry.initial_delay_ms))
            .with_attempt_timeout(Duration::from_secs(self.retry.attempt_timeout_seconds))
    }

    pub fn retrieval_config(&self) -> RetrievalConfig {
        RetrievalConfig {
            max_terms: self.retrieval.max_terms,
            min_term_chars: self.retrieval.min_term_chars,
            limit: self.retrieval.limit,
        }
    }
}

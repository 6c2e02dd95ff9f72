//! Request and response bodies for the chat endpoints

use mabrur_domain::{AnswerResult, Provenance};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Body of `POST /chat`.
///
/// Older clients send `message`, newer ones `question`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
}

impl ChatRequest {
    /// The user's text: a non-blank `question` wins over `message`.
    pub fn text(&self) -> &str {
        self.question
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or(self.message.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub source: Provenance,
    pub duration_ms: u64,
}

impl ChatResponse {
    pub fn new(result: AnswerResult, elapsed: Duration) -> Self {
        Self {
            answer: result.text,
            source: result.source,
            duration_ms: elapsed.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

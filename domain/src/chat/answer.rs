//! Answer result and provenance tagging

use serde::{Deserialize, Serialize};

/// Shown whenever the provider could not produce an answer.
pub const FALLBACK_MESSAGE: &str = "Mohon maaf, sistem sedang menyesuaikan. 🤲\n\
Silakan ulangi pertanyaan Anda, insyaAllah saya siap membantu.";

/// Shown when the input was blank.
pub const VALIDATION_MESSAGE: &str = "Silakan ketik pertanyaan Anda. 🤲";

/// Where an answer came from.
///
/// Clients offer a manual retry only for [`Provenance::Fallback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// Generated by the inference provider.
    Answered,
    /// The provider failed; the fixed fallback text was returned.
    Fallback,
    /// The input was rejected before any work was done.
    ValidationRejected,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Answered => "answered",
            Provenance::Fallback => "fallback",
            Provenance::ValidationRejected => "validation-rejected",
        }
    }

    /// Whether the caller should offer to resend the same question.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Provenance::Fallback)
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final output of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub text: String,
    pub source: Provenance,
}

impl AnswerResult {
    pub fn answered(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: Provenance::Answered,
        }
    }

    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_MESSAGE.to_string(),
            source: Provenance::Fallback,
        }
    }

    pub fn validation_rejected() -> Self {
        Self {
            text: VALIDATION_MESSAGE.to_string(),
            source: Provenance::ValidationRejected,
        }
    }
}

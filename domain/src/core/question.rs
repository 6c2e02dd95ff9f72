//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A pilgrim's question (Value Object)
///
/// Always holds trimmed, non-empty text. Construction is the validation
/// step of the answer pipeline: a raw input that fails to parse is rejected
/// before any store query or provider call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Parse raw user input into a question.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Self::try_new(raw).ok_or(DomainError::EmptyQuestion)
    }

    /// Try to create a new question, returning None if blank
    pub fn try_new(content: impl AsRef<str>) -> Option<Self> {
        let trimmed = content.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                content: trimmed.to_string(),
            })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl std::str::FromStr for Question {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

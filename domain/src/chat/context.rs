//! Grounding context value objects

use crate::knowledge::record::KnowledgeRecord;
use serde::{Deserialize, Serialize};

/// A (prompt, answer) pair copied out of the knowledge store for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSnippet {
    pub prompt: String,
    pub answer: String,
}

impl ContextSnippet {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }

    /// Render as a `Q:` / `A:` pair.
    pub fn render(&self) -> String {
        format!("Q: {}\nA: {}", self.prompt, self.answer)
    }
}

impl From<KnowledgeRecord> for ContextSnippet {
    fn from(record: KnowledgeRecord) -> Self {
        Self {
            prompt: record.question,
            answer: record.answer,
        }
    }
}

/// Ordered, bounded set of snippets retrieved for one question.
///
/// Order is retrieval rank. The batch never holds more than the limit it was
/// built with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextBatch {
    snippets: Vec<ContextSnippet>,
}

impl ContextBatch {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a batch, keeping at most `limit` snippets in their given order.
    pub fn from_snippets(snippets: impl IntoIterator<Item = ContextSnippet>, limit: usize) -> Self {
        Self {
            snippets: snippets.into_iter().take(limit).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn snippets(&self) -> &[ContextSnippet] {
        &self.snippets
    }

    /// All snippets rendered and separated by blank lines.
    pub fn render(&self) -> String {
        self.snippets
            .iter()
            .map(ContextSnippet::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

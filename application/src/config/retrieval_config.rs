//! Context retrieval parameters.

use serde::{Deserialize, Serialize};

/// Controls search term extraction and the size of the context batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Search terms kept from the question.
    pub max_terms: usize,
    /// Tokens shorter than this many characters are ignored.
    pub min_term_chars: usize,
    /// Maximum snippets per context batch.
    pub limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_terms: 3,
            min_term_chars: 3,
            limit: 3,
        }
    }
}

impl RetrievalConfig {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

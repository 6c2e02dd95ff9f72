//! Search term extraction

use super::record::KnowledgeRecord;

/// Lowercased search terms extracted from a question.
///
/// Matching is OR across terms and OR across the question and keyword
/// fields of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerms {
    terms: Vec<String>,
}

impl SearchTerms {
    /// Split on whitespace, lowercase, drop tokens shorter than
    /// `min_chars` characters and keep the first `max_terms` survivors.
    pub fn extract(text: &str, max_terms: usize, min_chars: usize) -> Self {
        let terms = text
            .split_whitespace()
            .map(str::to_lowercase)
            .filter(|t| t.chars().count() >= min_chars)
            .take(max_terms)
            .collect();
        Self { terms }
    }

    pub fn from_terms(terms: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            terms: terms.into_iter().map(|t| t.into().to_lowercase()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Whether an active record contains any term in its question or keywords.
    pub fn matches(&self, record: &KnowledgeRecord) -> bool {
        if !record.is_active {
            return false;
        }
        let question = record.question.to_lowercase();
        let keywords = record.keywords.to_lowercase();
        self.iter()
            .any(|term| question.contains(term) || keywords.contains(term))
    }
}

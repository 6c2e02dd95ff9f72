//! Retrieve Context use case.
//!
//! Finds a few knowledge records related to the question so the prompt can
//! be grounded. Retrieval is an optimisation: a failing store yields an empty
//! batch and the pipeline carries on without context.

use crate::config::RetrievalConfig;
use crate::ports::knowledge_store::KnowledgeStore;
use mabrur_domain::{ContextBatch, ContextSnippet, Question, SearchTerms};
use std::sync::Arc;
use tracing::{debug, warn};

/// Use case for fetching grounding context for one question.
#[derive(Clone)]
pub struct RetrieveContextUseCase {
    store: Arc<dyn KnowledgeStore>,
    config: RetrievalConfig,
}

impl RetrieveContextUseCase {
    pub fn new(store: Arc<dyn KnowledgeStore>) -> Self {
        Self {
            store,
            config: RetrievalConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RetrievalConfig) -> Self {
        self.config = config;
        self
    }

    /// Retrieve at most `config.limit` snippets. Never fails.
    pub async fn execute(&self, question: &Question) -> ContextBatch {
        let terms = SearchTerms::extract(
            question.content(),
            self.config.max_terms,
            self.config.min_term_chars,
        );

        if terms.is_empty() {
            debug!("No search terms in question, skipping context lookup");
            return ContextBatch::empty();
        }

        match self.store.find_active(&terms, self.config.limit).await {
            Ok(records) => {
                debug!(
                    "Context lookup for {:?} matched {} records",
                    terms.as_slice(),
                    records.len()
                );
                ContextBatch::from_snippets(
                    records.into_iter().map(ContextSnippet::from),
                    self.config.limit,
                )
            }
            Err(e) => {
                warn!("Knowledge store query failed, answering without context: {}", e);
                ContextBatch::empty()
            }
        }
    }
}

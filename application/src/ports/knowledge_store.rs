//! Knowledge store port
//!
//! Read-only query interface over the question/answer/keyword collection
//! used to ground answers.

use async_trait::async_trait;
use mabrur_domain::{KnowledgeRecord, SearchTerms};
use thiserror::Error;

/// Errors from a knowledge store query
#[derive(Error, Debug)]
pub enum KnowledgeStoreError {
    #[error("Knowledge store unavailable: {0}")]
    Unavailable(String),

    #[error("Knowledge query failed: {0}")]
    QueryFailed(String),
}

/// Source of grounding records
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Active records whose question or keywords contain any of the terms
    /// (case-insensitive), in store-native order, at most `limit` of them.
    async fn find_active(
        &self,
        terms: &SearchTerms,
        limit: usize,
    ) -> Result<Vec<KnowledgeRecord>, KnowledgeStoreError>;
}

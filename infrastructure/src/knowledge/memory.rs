//! In-memory knowledge store

use async_trait::async_trait;
use mabrur_application::ports::knowledge_store::{KnowledgeStore, KnowledgeStoreError};
use mabrur_domain::{KnowledgeRecord, SearchTerms, sample_records};
use std::sync::RwLock;

/// Knowledge store over a vector of records, used when no database is
/// configured.
#[derive(Debug, Default)]
pub struct InMemoryKnowledgeStore {
    records: RwLock<Vec<KnowledgeRecord>>,
}

impl InMemoryKnowledgeStore {
    pub fn new(records: Vec<KnowledgeRecord>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| match record.id {
                0 => record.with_id(i as i64 + 1),
                _ => record,
            })
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    /// Store pre-filled with the sample records.
    pub fn seeded() -> Self {
        Self::new(sample_records())
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KnowledgeStore for InMemoryKnowledgeStore {
    async fn find_active(
        &self,
        terms: &SearchTerms,
        limit: usize,
    ) -> Result<Vec<KnowledgeRecord>, KnowledgeStoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| KnowledgeStoreError::Unavailable("record lock poisoned".into()))?;

        Ok(records
            .iter()
            .filter(|record| terms.matches(record))
            .take(limit)
            .cloned()
            .collect())
    }
}

//! Knowledge store adapters

mod memory;
mod sqlite;

pub use memory::InMemoryKnowledgeStore;
pub use sqlite::{KnowledgeDbError, SqliteKnowledgeStore};

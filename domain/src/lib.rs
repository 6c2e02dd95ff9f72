//! Domain layer for mabrur
//!
//! This crate contains the value objects of the pilgrim chat assistant.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Question**: trimmed, non-empty pilgrim input
//! - **Knowledge record**: question/answer/keyword content used for grounding
//! - **Prompt**: persona, optional grounding context, then the question
//! - **Answer result**: the final text tagged with its provenance

pub mod chat;
pub mod core;
pub mod knowledge;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use chat::{
    answer::{AnswerResult, FALLBACK_MESSAGE, Provenance, VALIDATION_MESSAGE},
    context::{ContextBatch, ContextSnippet},
    message::{Message, Role},
};
pub use core::{error::DomainError, question::Question};
pub use knowledge::{
    record::{ContentType, KnowledgeRecord, sample_records},
    search::SearchTerms,
};
pub use prompt::{CONTEXT_HEADER, PromptTemplate};

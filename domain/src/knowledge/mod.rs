//! Knowledge domain.
//!
//! - [`record::KnowledgeRecord`]: a question/answer/keyword record
//! - [`search::SearchTerms`]: terms extracted from a question for lookup

pub mod record;
pub mod search;

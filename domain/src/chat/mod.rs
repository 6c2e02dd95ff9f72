//! Chat domain.
//!
//! - [`message::Message`]: a role-tagged prompt message
//! - [`context::ContextBatch`]: grounding snippets for one question
//! - [`answer::AnswerResult`]: the tagged final answer

pub mod answer;
pub mod context;
pub mod message;

//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod answer_question;
pub mod call_inference;
pub mod retrieve_context;
pub(crate) mod shared;

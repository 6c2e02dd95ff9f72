//! Application layer for mabrur
//!
//! This crate contains the answer pipeline use cases, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{RetrievalConfig, RetryPolicy};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    inference::{AttemptOutcome, InferenceError, InferenceProvider, ProviderError},
    inference_observer::{InferenceObserver, NoInferenceObserver},
    knowledge_store::{KnowledgeStore, KnowledgeStoreError},
};
pub use use_cases::answer_question::{AnswerQuestionUseCase, classify_response};
pub use use_cases::call_inference::{NextStep, ResilientInferenceClient, next_step};
pub use use_cases::retrieve_context::RetrieveContextUseCase;

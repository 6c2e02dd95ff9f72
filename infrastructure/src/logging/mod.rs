//! Logging adapters.
//!
//! - [`JsonlConversationLogger`]: JSONL transcript implementing the
//!   [`ConversationLogger`](mabrur_application::ConversationLogger) port.
//! - [`TracingInferenceObserver`]: routes retry-loop events to `tracing`.

mod jsonl_logger;
mod tracing_observer;

pub use jsonl_logger::JsonlConversationLogger;
pub use tracing_observer::TracingInferenceObserver;

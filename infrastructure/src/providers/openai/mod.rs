//! OpenAI-compatible chat-completions provider

mod provider;
mod types;

pub use provider::OpenAiProvider;

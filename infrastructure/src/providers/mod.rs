//! Inference provider adapters

pub mod openai;

pub use openai::OpenAiProvider;

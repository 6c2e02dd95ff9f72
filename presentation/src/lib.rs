//! Presentation layer for mabrur
//!
//! This crate contains the HTTP chat surface, CLI definitions,
//! and console output formatting.

pub mod cli;
pub mod http;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use http::{AppState, ChatRequest, ChatResponse};
pub use output::console::ConsoleFormatter;

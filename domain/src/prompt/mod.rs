//! Prompt domain
//!
//! Fixed persona text and the composition of a grounded chat request.

mod template;

pub use template::{CONTEXT_HEADER, PromptTemplate};

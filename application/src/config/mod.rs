//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`RetryPolicy`]: attempt limit, per-attempt deadline and backoff
//! - [`RetrievalConfig`]: search term extraction and context batch size

pub mod retrieval_config;
pub mod retry_policy;

pub use retrieval_config::RetrievalConfig;
pub use retry_policy::RetryPolicy;

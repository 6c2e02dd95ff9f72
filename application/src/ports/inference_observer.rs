//! Inference observer port
//!
//! Side channel for the retry loop. The loop reports what it does through
//! this trait and never touches a logger directly; adapters decide whether
//! events go to `tracing`, metrics, or nowhere.

use super::inference::{InferenceError, ProviderError};
use std::time::Duration;

/// Callbacks fired by the resilient inference loop
pub trait InferenceObserver: Send + Sync {
    /// Called before each attempt
    fn on_attempt_started(&self, _attempt: u32, _max_attempts: u32) {}

    /// Called when an attempt produced usable text
    fn on_attempt_succeeded(&self, _attempt: u32, _elapsed: Duration) {}

    /// Called when an attempt failed, with its classification
    fn on_attempt_failed(&self, _attempt: u32, _error: &ProviderError, _retryable: bool) {}

    /// Called before sleeping between attempts
    fn on_backoff(&self, _attempt: u32, _delay: Duration) {}

    /// Called once when the call ends without an answer
    fn on_gave_up(&self, _error: &InferenceError) {}
}

/// No-op observer for tests and when nothing should be reported
pub struct NoInferenceObserver;

impl InferenceObserver for NoInferenceObserver {}

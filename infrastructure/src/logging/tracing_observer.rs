//! [`InferenceObserver`] adapter that reports retry-loop events via `tracing`.

use mabrur_application::ports::inference::{InferenceError, ProviderError};
use mabrur_application::ports::inference_observer::InferenceObserver;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Emits one tracing event per attempt, failure, and backoff.
#[derive(Debug, Clone)]
pub struct TracingInferenceObserver {
    model: String,
}

impl TracingInferenceObserver {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

impl InferenceObserver for TracingInferenceObserver {
    fn on_attempt_started(&self, attempt: u32, max_attempts: u32) {
        debug!(model = %self.model, "Inference attempt {}/{}", attempt, max_attempts);
    }

    fn on_attempt_succeeded(&self, attempt: u32, elapsed: Duration) {
        info!(
            model = %self.model,
            elapsed_ms = elapsed.as_millis() as u64,
            "Inference attempt {} succeeded",
            attempt
        );
    }

    fn on_attempt_failed(&self, attempt: u32, error: &ProviderError, retryable: bool) {
        warn!(
            model = %self.model,
            retryable,
            "Inference attempt {} failed: {}",
            attempt,
            error
        );
    }

    fn on_backoff(&self, attempt: u32, delay: Duration) {
        info!(
            model = %self.model,
            "Retrying after attempt {} in {}ms",
            attempt,
            delay.as_millis()
        );
    }

    fn on_gave_up(&self, error: &InferenceError) {
        if error.is_cancelled() {
            debug!(model = %self.model, "Inference cancelled by caller");
        } else {
            warn!(model = %self.model, "Giving up on inference: {}", error);
        }
    }
}

//! Resilient inference call.
//!
//! Wraps an [`InferenceProvider`] with a per-attempt deadline, classified
//! retries and exponential backoff:
//!
//! ```text
//! Attempting(1) ──success──────────────▶ Done(text)
//!      │ retryable, attempts left
//!      ▼ sleep(initial * 2^(n-1))
//! Attempting(n+1) ── … ──▶ Exhausted(last cause)
//!      │ fatal
//!      ▼
//!    Fatal(cause)
//! ```
//!
//! The attempt counter lives on the stack of one call, so concurrent calls
//! share nothing but the immutable provider and policy.

use crate::config::RetryPolicy;
use crate::ports::inference::{AttemptOutcome, InferenceError, InferenceProvider, ProviderError};
use crate::ports::inference_observer::{InferenceObserver, NoInferenceObserver};
use crate::use_cases::shared::{check_cancelled, run_cancellable};
use mabrur_domain::Message;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// What the loop does after an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// Return this text to the caller.
    Done(String),
    /// Sleep, then run attempt number `next_attempt`.
    Retry { next_attempt: u32, delay: Duration },
    /// Stop with this error.
    GiveUp(InferenceError),
}

/// Decide the transition out of attempt number `attempt`.
pub fn next_step(policy: &RetryPolicy, attempt: u32, outcome: AttemptOutcome) -> NextStep {
    match outcome {
        AttemptOutcome::Success(text) => NextStep::Done(text),
        AttemptOutcome::Fatal(cause) => NextStep::GiveUp(InferenceError::Fatal { attempt, cause }),
        AttemptOutcome::Retryable(_) if policy.has_attempts_after(attempt) => NextStep::Retry {
            next_attempt: attempt + 1,
            delay: policy.backoff_delay(attempt),
        },
        AttemptOutcome::Retryable(cause) => NextStep::GiveUp(InferenceError::Exhausted {
            attempts: attempt,
            cause,
        }),
    }
}

/// Provider client with deadline, retry and cancellation handling.
#[derive(Clone)]
pub struct ResilientInferenceClient {
    provider: Arc<dyn InferenceProvider>,
    policy: RetryPolicy,
    observer: Arc<dyn InferenceObserver>,
}

impl ResilientInferenceClient {
    pub fn new(provider: Arc<dyn InferenceProvider>) -> Self {
        Self {
            provider,
            policy: RetryPolicy::default(),
            observer: Arc::new(NoInferenceObserver),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn InferenceObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Call the provider until it answers or no attempts remain.
    /// A fatal error ends the call at once.
    pub async fn call(&self, messages: &[Message]) -> Result<String, InferenceError> {
        self.call_with_cancellation(messages, &CancellationToken::new())
            .await
    }

    /// Like [`call`](Self::call), but stops as soon as `cancellation` fires.
    ///
    /// No new attempt starts after cancellation, and an attempt or backoff
    /// sleep in progress is abandoned.
    pub async fn call_with_cancellation(
        &self,
        messages: &[Message],
        cancellation: &CancellationToken,
    ) -> Result<String, InferenceError> {
        let result = self.run(messages, cancellation).await;
        if let Err(ref e) = result {
            self.observer.on_gave_up(e);
        }
        result
    }

    async fn run(
        &self,
        messages: &[Message],
        cancellation: &CancellationToken,
    ) -> Result<String, InferenceError> {
        let mut attempt = 1;

        loop {
            check_cancelled(cancellation)?;
            self.observer
                .on_attempt_started(attempt, self.policy.max_attempts);

            let started = Instant::now();
            let outcome = self.attempt(messages, cancellation).await?;
            match &outcome {
                AttemptOutcome::Success(_) => self
                    .observer
                    .on_attempt_succeeded(attempt, started.elapsed()),
                AttemptOutcome::Retryable(e) => self.observer.on_attempt_failed(attempt, e, true),
                AttemptOutcome::Fatal(e) => self.observer.on_attempt_failed(attempt, e, false),
            }

            match next_step(&self.policy, attempt, outcome) {
                NextStep::Done(text) => return Ok(text),
                NextStep::GiveUp(error) => return Err(error),
                NextStep::Retry {
                    next_attempt,
                    delay,
                } => {
                    self.observer.on_backoff(attempt, delay);
                    run_cancellable(cancellation, tokio::time::sleep(delay)).await?;
                    attempt = next_attempt;
                }
            }
        }
    }

    /// One network attempt raced against the deadline and the token.
    ///
    /// Both the deadline and cancellation drop the provider future, which
    /// aborts the in-flight request.
    async fn attempt(
        &self,
        messages: &[Message],
        cancellation: &CancellationToken,
    ) -> Result<AttemptOutcome, InferenceError> {
        let deadline = tokio::time::timeout(
            self.policy.attempt_timeout,
            self.provider.complete(messages),
        );

        Ok(match run_cancellable(cancellation, deadline).await? {
            Ok(result) => AttemptOutcome::classify(result),
            Err(_elapsed) => AttemptOutcome::Retryable(ProviderError::Timeout),
        })
    }
}

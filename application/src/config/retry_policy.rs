//! Retry policy: inference call bounds.
//!
//! [`RetryPolicy`] holds the static parameters of the resilient inference
//! loop: how many attempts, how long each one may run, and the base delay of
//! the exponential backoff between attempts.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Attempt limit, per-attempt deadline and backoff base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled for each later one.
    pub initial_delay: Duration,
    /// Hard deadline for a single attempt.
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            initial_delay: Duration::from_millis(1000),
            attempt_timeout: Duration::from_secs(25),
        }
    }
}

impl RetryPolicy {
    // ==================== Builder Methods ====================

    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Delay to wait after failed attempt number `attempt` (1-based):
    /// `initial_delay * 2^(attempt-1)`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_delay.saturating_mul(1u32 << exponent)
    }

    /// Whether another attempt may follow attempt number `attempt`.
    pub fn has_attempts_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.initial_delay, Duration::from_secs(1));
        assert_eq!(policy.attempt_timeout, Duration::from_secs(25));
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_delay(1), Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(4));
    }

    #[test]
    fn test_backoff_exponent_is_capped() {
        let policy = RetryPolicy::default().with_initial_delay(Duration::from_millis(1));
        assert_eq!(policy.backoff_delay(100), Duration::from_millis(1 << 16));
    }

    #[test]
    fn test_has_attempts_after() {
        let policy = RetryPolicy::default();
        assert!(policy.has_attempts_after(1));
        assert!(!policy.has_attempts_after(2));
    }
}

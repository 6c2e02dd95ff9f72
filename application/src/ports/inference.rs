//! Inference provider port
//!
//! Defines the interface for calling a chat-completion provider, the typed
//! errors it reports, and how each attempt is classified for retrying.

use async_trait::async_trait;
use mabrur_domain::Message;
use thiserror::Error;

/// HTTP statuses that indicate a transient provider fault.
pub const RETRYABLE_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];

/// Substrings of untyped transport errors that indicate a transient fault.
const TRANSIENT_MARKERS: [&str; 7] = [
    "timeout",
    "timed out",
    "network",
    "econnreset",
    "connection reset",
    "fetch failed",
    "socket",
];

/// Errors a provider reports for a single attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned an empty response")]
    EmptyResponse,

    #[error("Provider API key is not configured")]
    MissingCredentials,

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Provider error: {0}")]
    Other(String),
}

impl ProviderError {
    /// Whether retrying the identical request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Status { status, .. } => RETRYABLE_STATUS_CODES.contains(status),
            ProviderError::Timeout | ProviderError::Network(_) | ProviderError::EmptyResponse => {
                true
            }
            ProviderError::MissingCredentials | ProviderError::MalformedResponse(_) => false,
            ProviderError::Other(message) => {
                let message = message.to_lowercase();
                TRANSIENT_MARKERS.iter().any(|m| message.contains(m))
            }
        }
    }
}

/// Classified result of one network attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success(String),
    Retryable(ProviderError),
    Fatal(ProviderError),
}

impl AttemptOutcome {
    /// Classify a raw provider result.
    ///
    /// Blank text counts as a retryable [`ProviderError::EmptyResponse`];
    /// successful text is trimmed.
    pub fn classify(result: Result<String, ProviderError>) -> Self {
        match result {
            Ok(text) if text.trim().is_empty() => {
                AttemptOutcome::Retryable(ProviderError::EmptyResponse)
            }
            Ok(text) => AttemptOutcome::Success(text.trim().to_string()),
            Err(e) if e.is_retryable() => AttemptOutcome::Retryable(e),
            Err(e) => AttemptOutcome::Fatal(e),
        }
    }
}

/// Final error of a resilient inference call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error("Fatal provider error on attempt {attempt}: {cause}")]
    Fatal { attempt: u32, cause: ProviderError },

    #[error("Gave up after {attempts} attempts: {cause}")]
    Exhausted { attempts: u32, cause: ProviderError },

    #[error("Inference cancelled")]
    Cancelled,
}

impl InferenceError {
    /// The provider error behind this failure, if any.
    pub fn cause(&self) -> Option<&ProviderError> {
        match self {
            InferenceError::Fatal { cause, .. } | InferenceError::Exhausted { cause, .. } => {
                Some(cause)
            }
            InferenceError::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, InferenceError::Cancelled)
    }
}

/// Chat-completion provider
///
/// Implementations (adapters) live in the infrastructure layer. One call is
/// one network attempt; retries, deadlines and cancellation are handled by
/// [`ResilientInferenceClient`](crate::use_cases::call_inference::ResilientInferenceClient).
/// Implementations must be safe for concurrent use by many requests.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Model identifier, for logs.
    fn model(&self) -> &str;

    /// Send the ordered messages and return the generated text.
    async fn complete(&self, messages: &[Message]) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ProviderError {
        ProviderError::Status {
            status: code,
            message: "x".to_string(),
        }
    }

    #[test]
    fn test_retryable_statuses() {
        for code in [429, 500, 502, 503, 504] {
            assert!(status(code).is_retryable(), "{} should retry", code);
        }
        for code in [400, 401, 403, 404, 422, 501] {
            assert!(!status(code).is_retryable(), "{} should not retry", code);
        }
    }

    #[test]
    fn test_transport_errors_retry() {
        assert!(ProviderError::Timeout.is_retryable());
        assert!(ProviderError::Network("connection refused".to_string()).is_retryable());
        assert!(ProviderError::EmptyResponse.is_retryable());
    }

    #[test]
    fn test_untyped_errors_classified_by_message() {
        assert!(ProviderError::Other("read ECONNRESET".to_string()).is_retryable());
        assert!(ProviderError::Other("Socket hang up".to_string()).is_retryable());
        assert!(ProviderError::Other("fetch failed".to_string()).is_retryable());
        assert!(!ProviderError::Other("invalid model".to_string()).is_retryable());
    }

    #[test]
    fn test_credentials_and_decode_errors_are_fatal() {
        assert!(!ProviderError::MissingCredentials.is_retryable());
        assert!(!ProviderError::MalformedResponse("eof".to_string()).is_retryable());
    }

    #[test]
    fn test_classify_blank_text_is_retryable() {
        assert_eq!(
            AttemptOutcome::classify(Ok("  \n".to_string())),
            AttemptOutcome::Retryable(ProviderError::EmptyResponse)
        );
    }

    #[test]
    fn test_classify_trims_success() {
        assert_eq!(
            AttemptOutcome::classify(Ok(" Jawaban \n".to_string())),
            AttemptOutcome::Success("Jawaban".to_string())
        );
    }

    #[test]
    fn test_classify_errors() {
        assert!(matches!(
            AttemptOutcome::classify(Err(status(503))),
            AttemptOutcome::Retryable(_)
        ));
        assert!(matches!(
            AttemptOutcome::classify(Err(status(401))),
            AttemptOutcome::Fatal(_)
        ));
    }

    #[test]
    fn test_inference_error_cause() {
        let err = InferenceError::Exhausted {
            attempts: 2,
            cause: ProviderError::Timeout,
        };
        assert_eq!(err.cause(), Some(&ProviderError::Timeout));
        assert!(InferenceError::Cancelled.cause().is_none());
        assert!(InferenceError::Cancelled.is_cancelled());
    }
}

//! Shared utilities for use cases.
//!
//! Cancellation helpers used by the inference loop.

use crate::ports::inference::InferenceError;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(InferenceError::Cancelled)` if the token is cancelled.
pub(crate) fn check_cancelled(token: &CancellationToken) -> Result<(), InferenceError> {
    if token.is_cancelled() {
        return Err(InferenceError::Cancelled);
    }
    Ok(())
}

/// Drive `future` to completion unless the token fires first.
///
/// On cancellation the future is dropped, which aborts whatever I/O it had
/// in flight.
pub(crate) async fn run_cancellable<F: Future>(
    token: &CancellationToken,
    future: F,
) -> Result<F::Output, InferenceError> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(InferenceError::Cancelled),
        output = future => Ok(output),
    }
}

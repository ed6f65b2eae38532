//! Timeout wrapper for time-limited handler execution.

use fieldwatch_core::{BoxError, FieldChange, FieldHandler, IntoOutcome, Snapshot};
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

/// Error returned when a field handler times out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("handler for field `{field}` timed out after {limit:?}")]
pub struct TimeoutError {
    /// The field whose handler timed out.
    pub field: String,
    /// The time limit that was exceeded.
    pub limit: Duration,
}

/// A handler that wraps another handler with a timeout.
///
/// The inner handler's future is dropped once the limit is exceeded.
/// Requires a tokio runtime with the time driver enabled.
#[derive(Clone)]
pub struct TimeoutHandler<H> {
    inner: H,
    limit: Duration,
}

impl<H> TimeoutHandler<H> {
    /// Create a new timeout handler.
    pub fn new(inner: H, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

impl<S: Snapshot, H: FieldHandler<S>> FieldHandler<S> for TimeoutHandler<H> {
    type Output = Result<(), BoxError>;

    async fn call(&self, update: FieldChange<S>) -> Self::Output {
        let field = update.field().to_owned();
        match timeout(self.limit, self.inner.call(update)).await {
            Ok(output) => output.into_outcome(),
            Err(_) => Err(Box::new(TimeoutError {
                field,
                limit: self.limit,
            })),
        }
    }
}

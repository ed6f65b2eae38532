//! Logging wrapper for field handler observation.

use fieldwatch_core::{BoxError, FieldChange, FieldHandler, IntoOutcome, Snapshot};

/// A handler that logs each invocation of the handler it wraps.
///
/// Emits an `info` event before the inner handler runs and a `debug` event
/// with its outcome. Logging requires the `tracing` feature; without it the
/// wrapper is transparent.
#[derive(Clone)]
pub struct LoggingHandler<H> {
    inner: H,
}

impl<H> LoggingHandler<H> {
    /// Wrap `inner`.
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    /// The wrapped handler.
    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<S: Snapshot, H: FieldHandler<S>> FieldHandler<S> for LoggingHandler<H> {
    type Output = Result<(), BoxError>;

    async fn call(&self, update: FieldChange<S>) -> Self::Output {
        #[cfg(feature = "tracing")]
        let field = update.field().to_owned();
        #[cfg(feature = "tracing")]
        tracing::info!(
            field = %field,
            before = ?update.before(),
            after = ?update.after(),
            "invoking field handler"
        );

        let outcome = self.inner.call(update).await.into_outcome();

        #[cfg(feature = "tracing")]
        {
            match &outcome {
                Ok(()) => tracing::debug!(field = %field, "field handler completed"),
                Err(error) => tracing::debug!(field = %field, %error, "field handler failed"),
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingHandler, FailingHandler};
    use fieldwatch_core::{Change, DynFieldHandler, Fields};
    use serde_json::json;
    use std::sync::Arc;

    fn update() -> FieldChange<Option<Fields>> {
        let change = Change::new(None, json!({"name": "A"}).as_object().cloned());
        FieldChange::read("name", Arc::new(change))
    }

    #[tokio::test]
    async fn test_logging_is_transparent() {
        let counter = CountingHandler::new();
        let handler = LoggingHandler::new(counter.clone());
        handler.call_dyn(update()).await.unwrap();
        assert_eq!(counter.count(), 1);
    }

    #[tokio::test]
    async fn test_logging_keeps_error() {
        let handler = LoggingHandler::new(FailingHandler::new("nope"));
        let err = handler.call_dyn(update()).await.unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }
}

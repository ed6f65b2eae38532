//! Handlers built from `(before, after, change)` closures.

use fieldwatch_core::{Change, FieldChange, FieldHandler, IntoOutcome, Snapshot};
use serde_json::Value;
use std::{future::Future, sync::Arc};

/// A handler wrapping an async `(before, after, change)` closure.
///
/// Created with [`handler_fn`].
#[derive(Clone)]
pub struct FnHandler<F> {
    func: F,
}

/// Wrap an async closure taking `(before, after, change)`.
///
/// ```rust,ignore
/// let on_status = handler_fn(|before, after, change| async move {
///     notify(before, after, change.after.id()).await
/// });
/// ```
pub fn handler_fn<S, F, Fut>(func: F) -> FnHandler<F>
where
    S: Snapshot,
    F: Fn(Option<Value>, Option<Value>, Arc<Change<S>>) -> Fut,
{
    FnHandler { func }
}

impl<S, F, Fut, Out> FieldHandler<S> for FnHandler<F>
where
    S: Snapshot,
    F: Fn(Option<Value>, Option<Value>, Arc<Change<S>>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Out> + Send,
    Out: IntoOutcome + Send,
{
    type Output = Out;

    fn call(&self, update: FieldChange<S>) -> impl Future<Output = Self::Output> + Send {
        let (before, after, change) = update.into_parts();
        (self.func)(before, after, change)
    }
}

/// A handler wrapping a synchronous `(before, after, change)` closure.
///
/// Created with [`sync_fn`]. The closure runs when the dispatch first polls
/// the handler and completes immediately.
#[derive(Clone)]
pub struct SyncFnHandler<F> {
    func: F,
}

/// Wrap a synchronous closure taking `(before, after, change)`.
pub fn sync_fn<S, F, Out>(func: F) -> SyncFnHandler<F>
where
    S: Snapshot,
    F: Fn(Option<Value>, Option<Value>, Arc<Change<S>>) -> Out,
{
    SyncFnHandler { func }
}

impl<S, F, Out> FieldHandler<S> for SyncFnHandler<F>
where
    S: Snapshot,
    F: Fn(Option<Value>, Option<Value>, Arc<Change<S>>) -> Out + Send + Sync + 'static,
    Out: IntoOutcome + Send,
{
    type Output = Out;

    async fn call(&self, update: FieldChange<S>) -> Self::Output {
        let (before, after, change) = update.into_parts();
        (self.func)(before, after, change)
    }
}

//! # Field Handlers
//!
//! A field handler is the endpoint invoked when one field of a record changes.
//! It receives a [`FieldChange`]: the field name, the value before the update,
//! the value after it and the whole [`Change`] for context.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|update: FieldChange<S>| async move { ... }`
//! 2. **Struct implementation**: `impl FieldHandler<S> for MyHandler`
//! 3. **Adapters** from `fieldwatch-std`: `handler_fn`, `sync_fn`, `typed`
//!
//! Handlers may return anything implementing [`IntoOutcome`], usually `()` or
//! `Result<(), E>`.

use crate::{
    error::BoxError,
    outcome::IntoOutcome,
    snapshot::{Change, Snapshot},
};
use serde_json::Value;
use std::{future::Future, pin::Pin, sync::Arc};

/// The values of one changed field plus the change they came from.
#[derive(Debug)]
pub struct FieldChange<S> {
    field: Arc<str>,
    before: Option<Value>,
    after: Option<Value>,
    change: Arc<Change<S>>,
}

impl<S> Clone for FieldChange<S> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            before: self.before.clone(),
            after: self.after.clone(),
            change: self.change.clone(),
        }
    }
}

impl<S: Snapshot> FieldChange<S> {
    /// Create a field change.
    pub fn new(
        field: impl Into<Arc<str>>,
        before: Option<Value>,
        after: Option<Value>,
        change: Arc<Change<S>>,
    ) -> Self {
        Self {
            field: field.into(),
            before,
            after,
            change,
        }
    }

    /// Read `field` from both states of `change`.
    pub fn read(field: impl Into<Arc<str>>, change: Arc<Change<S>>) -> Self {
        let field = field.into();
        let before = change.before.get(&field).cloned();
        let after = change.after.get(&field).cloned();
        Self::new(field, before, after, change)
    }
}

impl<S> FieldChange<S> {
    /// The name of the changed field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The value before the update, `None` if absent.
    pub fn before(&self) -> Option<&Value> {
        self.before.as_ref()
    }

    /// The value after the update, `None` if absent.
    pub fn after(&self) -> Option<&Value> {
        self.after.as_ref()
    }

    /// The full change this field belongs to.
    pub fn change(&self) -> &Arc<Change<S>> {
        &self.change
    }

    /// Split into `(before, after, change)`.
    pub fn into_parts(self) -> (Option<Value>, Option<Value>, Arc<Change<S>>) {
        (self.before, self.after, self.change)
    }
}

/// The endpoint invoked when a registered field changes.
///
/// # Static vs Dynamic Dispatch
///
/// This trait uses native `async fn` for static dispatch.
/// Handler maps store handlers as [`DynFieldHandler`] trait objects.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle field changes of `{S}` records",
    label = "missing `FieldHandler<{S}>` implementation",
    note = "Closures must take a `FieldChange<{S}>` and return a future; use `handler_fn` for `(before, after, change)` closures."
)]
pub trait FieldHandler<S: Snapshot>: Send + Sync + 'static {
    /// The output type of the handler, usually `()` or `Result`.
    type Output: IntoOutcome + Send;

    /// Handle a change of one field.
    fn call(&self, update: FieldChange<S>) -> impl Future<Output = Self::Output> + Send;
}

// Blanket impl for closures
impl<S, F, Out, Fut> FieldHandler<S> for F
where
    S: Snapshot,
    Out: IntoOutcome + Send,
    F: Fn(FieldChange<S>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Out> + Send,
{
    type Output = Out;

    fn call(&self, update: FieldChange<S>) -> impl Future<Output = Self::Output> + Send {
        (self)(update)
    }
}

/// Object-safe version of [`FieldHandler`].
///
/// Use this trait when handlers of different types live in one collection.
pub trait DynFieldHandler<S: Snapshot>: Send + Sync + 'static {
    /// Handle a change of one field (dynamic dispatch version).
    fn call_dyn(
        &self,
        update: FieldChange<S>,
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + '_>>;
}

impl<S, H> DynFieldHandler<S> for H
where
    S: Snapshot,
    H: FieldHandler<S>,
{
    fn call_dyn(
        &self,
        update: FieldChange<S>,
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + '_>> {
        Box::pin(async move { self.call(update).await.into_outcome() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Fields;
    use serde_json::json;

    fn change() -> Arc<Change<Option<Fields>>> {
        let before = json!({"name": "A"}).as_object().cloned();
        let after = json!({"name": "B", "age": 2}).as_object().cloned();
        Arc::new(Change::new(before, after))
    }

    #[test]
    fn test_read_field() {
        let update = FieldChange::read("name", change());
        assert_eq!(update.field(), "name");
        assert_eq!(update.before(), Some(&json!("A")));
        assert_eq!(update.after(), Some(&json!("B")));

        let added = FieldChange::read("age", change());
        assert_eq!(added.before(), None);
        assert_eq!(added.after(), Some(&json!(2)));
    }

    #[tokio::test]
    async fn test_closure_is_handler() {
        let handler = |update: FieldChange<Option<Fields>>| async move {
            if update.after().is_some() {
                Ok(())
            } else {
                Err("field removed")
            }
        };

        let present = FieldChange::read("name", change());
        assert!(handler.call_dyn(present).await.is_ok());

        let missing = FieldChange::read("missing", change());
        let err = handler.call_dyn(missing).await.unwrap_err();
        assert_eq!(err.to_string(), "field removed");
    }

    struct Unit;

    impl FieldHandler<Option<Fields>> for Unit {
        type Output = ();

        async fn call(&self, _update: FieldChange<Option<Fields>>) -> Self::Output {}
    }

    #[tokio::test]
    async fn test_struct_handler_boxed() {
        let boxed: Box<dyn DynFieldHandler<Option<Fields>>> = Box::new(Unit);
        assert!(boxed.call_dyn(FieldChange::read("name", change())).await.is_ok());
    }
}

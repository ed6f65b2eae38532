//! Field-change dispatch.
//!
//! Compares the two states of a [`Change`] field by field and invokes the
//! handler registered for every field whose value changed.
//!
//! All qualifying handlers are started together and driven concurrently on
//! the caller's task. The dispatch resolves once every started handler has
//! completed. A failing handler never cancels the others: every handler runs
//! to completion and all failures are reported together.

use crate::registry::FieldHandlers;
use fieldwatch_core::{
    Change, DispatchError, DynFieldHandler, FieldChange, HandlerFailure, Snapshot, deep_equal,
};
use futures::future::join_all;
use std::sync::Arc;

/// The fields whose handlers ran during a successful dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    invoked: Vec<String>,
}

impl DispatchReport {
    /// The invoked fields, in no particular order.
    pub fn invoked(&self) -> &[String] {
        &self.invoked
    }

    /// Whether the handler for `field` was invoked.
    pub fn was_invoked(&self, field: &str) -> bool {
        self.invoked.iter().any(|f| f == field)
    }

    /// Number of invoked handlers.
    pub fn len(&self) -> usize {
        self.invoked.len()
    }

    /// Whether no handler was invoked.
    pub fn is_empty(&self) -> bool {
        self.invoked.is_empty()
    }
}

impl<S: Snapshot> FieldHandlers<S> {
    /// Dispatch a change to the handlers of every changed field.
    ///
    /// A handler is invoked exactly once when its slot is filled and the
    /// field's before and after values are not deeply equal. Fields without
    /// a handler are never read.
    pub async fn dispatch(
        &self,
        change: impl Into<Arc<Change<S>>>,
    ) -> Result<DispatchReport, DispatchError> {
        let change = change.into();
        let mut invoked = Vec::new();
        let mut pending = Vec::new();

        for (field, slot) in self.iter() {
            let Some(handler) = slot else {
                #[cfg(feature = "tracing")]
                tracing::trace!(field, "no handler in slot, skipping");
                continue;
            };

            let before = change.before.get(field);
            let after = change.after.get(field);
            if deep_equal(before, after) {
                #[cfg(feature = "tracing")]
                tracing::trace!(field, "field unchanged, skipping");
                continue;
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(field, "field changed, invoking handler");

            let update = FieldChange::new(field, before.cloned(), after.cloned(), change.clone());
            invoked.push(field.to_owned());
            pending.push(async move {
                handler
                    .call_dyn(update)
                    .await
                    .map_err(|source| HandlerFailure::new(field, source))
            });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            registered = self.len(),
            invoked = pending.len(),
            "dispatching field changes"
        );

        let failures: Vec<HandlerFailure> = join_all(pending)
            .await
            .into_iter()
            .filter_map(Result::err)
            .collect();

        match DispatchError::from_failures(failures) {
            Some(err) => Err(err),
            None => Ok(DispatchReport { invoked }),
        }
    }
}

/// Dispatch `change` to `handlers`.
///
/// Equivalent to [`FieldHandlers::dispatch`].
pub async fn on_field_update<S: Snapshot>(
    change: impl Into<Arc<Change<S>>>,
    handlers: &FieldHandlers<S>,
) -> Result<DispatchReport, DispatchError> {
    handlers.dispatch(change).await
}

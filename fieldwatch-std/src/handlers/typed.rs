//! Handlers over deserialized field values.
//!
//! [`typed`] wraps a closure taking `(Option<T>, Option<T>, change)` and
//! decodes both field values into `T` with serde before calling it. A value
//! that does not decode fails the handler with a [`DecodeError`].
//!
//! Absent values stay `None`. A present `null` decodes into `T` like any
//! other value, so use `T = Option<U>` for nullable fields.

use fieldwatch_core::{Change, DecodeError, FieldChange, FieldHandler, IntoOutcome, Snapshot};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{future::Future, marker::PhantomData, sync::Arc};

/// A handler that decodes field values before calling its closure.
pub struct Typed<F, T> {
    func: F,
    _marker: PhantomData<fn() -> T>,
}

impl<F: Clone, T> Clone for Typed<F, T> {
    fn clone(&self) -> Self {
        Self {
            func: self.func.clone(),
            _marker: PhantomData,
        }
    }
}

/// Wrap an async closure taking decoded `(before, after, change)` values.
///
/// ```rust,ignore
/// let on_age = typed(|before: Option<u32>, after: Option<u32>, _change| async move {
///     if after < before { audit_age_decrease(before, after).await } else { Ok(()) }
/// });
/// ```
pub fn typed<S, T, F, Fut>(func: F) -> Typed<F, T>
where
    S: Snapshot,
    T: DeserializeOwned,
    F: Fn(Option<T>, Option<T>, Arc<Change<S>>) -> Fut,
{
    Typed {
        func,
        _marker: PhantomData,
    }
}

fn decode<T: DeserializeOwned>(field: &str, value: Option<Value>) -> Result<Option<T>, DecodeError> {
    value
        .map(serde_json::from_value)
        .transpose()
        .map_err(|source| DecodeError {
            field: field.to_owned(),
            source,
        })
}

impl<S, T, F, Fut, Out> FieldHandler<S> for Typed<F, T>
where
    S: Snapshot,
    T: DeserializeOwned + Send + 'static,
    F: Fn(Option<T>, Option<T>, Arc<Change<S>>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Out> + Send,
    Out: IntoOutcome + Send,
{
    type Output = Result<Out, DecodeError>;

    async fn call(&self, update: FieldChange<S>) -> Self::Output {
        let field = update.field().to_owned();
        let (before, after, change) = update.into_parts();
        let before = decode(&field, before)?;
        let after = decode(&field, after)?;
        Ok((self.func)(before, after, change).await)
    }
}

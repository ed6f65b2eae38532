//! Testing utilities for fieldwatch.
//!
//! This module provides handlers that make dispatch behavior easy to assert.
//!
//! # Features
//!
//! - [`RecordingHandler`]: Records every [`FieldChange`] it receives
//! - [`CountingHandler`]: Counts invocations
//! - [`FailingHandler`]: Always fails with a fixed message, counting invocations

use fieldwatch_core::{BoxError, FieldChange, FieldHandler, Snapshot};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records all field changes it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::<DocumentSnapshot>::new();
///
/// let handlers = FieldHandlers::builder()
///     .on("name", recorder.clone())
///     .build()?;
/// handlers.dispatch(change).await?;
///
/// let updates = recorder.updates();
/// assert_eq!(updates.len(), 1);
/// ```
pub struct RecordingHandler<S> {
    updates: Arc<Mutex<Vec<FieldChange<S>>>>,
}

impl<S> RecordingHandler<S> {
    /// Create a new recording handler.
    pub fn new() -> Self {
        Self {
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded field changes.
    pub fn updates(&self) -> Vec<FieldChange<S>> {
        self.updates.lock().unwrap().clone()
    }

    /// Get the number of recorded field changes.
    pub fn count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    /// Clear all recorded field changes.
    pub fn clear(&self) {
        self.updates.lock().unwrap().clear();
    }
}

impl<S> Default for RecordingHandler<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for RecordingHandler<S> {
    fn clone(&self) -> Self {
        Self {
            updates: self.updates.clone(),
        }
    }
}

impl<S: Snapshot> FieldHandler<S> for RecordingHandler<S> {
    type Output = ();

    async fn call(&self, update: FieldChange<S>) -> Self::Output {
        self.updates.lock().unwrap().push(update);
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
///
/// // Register counter.clone() and dispatch...
///
/// assert_eq!(counter.count(), 1);
/// ```
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Default for CountingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingHandler {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
        }
    }
}

impl<S: Snapshot> FieldHandler<S> for CountingHandler {
    type Output = ();

    async fn call(&self, _update: FieldChange<S>) -> Self::Output {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Failing Handler
// ============================================================================

/// A handler that always fails with the same message.
pub struct FailingHandler {
    message: String,
    count: Arc<AtomicUsize>,
}

impl FailingHandler {
    /// Create a handler failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times the handler was invoked.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Clone for FailingHandler {
    fn clone(&self) -> Self {
        Self {
            message: self.message.clone(),
            count: self.count.clone(),
        }
    }
}

impl<S: Snapshot> FieldHandler<S> for FailingHandler {
    type Output = Result<(), BoxError>;

    async fn call(&self, _update: FieldChange<S>) -> Self::Output {
        self.count.fetch_add(1, Ordering::SeqCst);
        Err(self.message.clone().into())
    }
}

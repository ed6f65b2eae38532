//! Error types for fieldwatch.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`FieldwatchError`] - Top-level error type for all fieldwatch operations
//! - [`DispatchError`] - Aggregate failure of a dispatch
//! - [`HandlerFailure`] - One failed field handler
//! - [`RegistrationError`] - Errors while building a handler map
//! - [`SnapshotError`] - Errors while building snapshots from typed records
//! - [`DecodeError`] - Errors while decoding field values for typed handlers

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all fieldwatch operations.
#[derive(Error, Debug)]
pub enum FieldwatchError {
    /// One or more field handlers failed.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A handler map could not be built.
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// A snapshot could not be built.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// A field value could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// A single field handler that failed during dispatch.
#[derive(Error, Debug)]
#[error("handler for field `{field}` failed: {source}")]
pub struct HandlerFailure {
    /// The field whose handler failed.
    pub field: String,
    /// The error returned by the handler.
    #[source]
    pub source: BoxError,
}

impl HandlerFailure {
    /// Create a new failure record for `field`.
    pub fn new(field: impl Into<String>, source: BoxError) -> Self {
        Self {
            field: field.into(),
            source,
        }
    }
}

/// The aggregate failure of a dispatch.
///
/// Every started handler runs to completion before this is reported, so
/// the failures listed here are all of the failures of that dispatch.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Exactly one handler failed.
    #[error(transparent)]
    Handler(HandlerFailure),

    /// Several handlers failed.
    #[error("{} field handlers failed", .0.len())]
    Multiple(Vec<HandlerFailure>),
}

impl DispatchError {
    /// Fold a list of failures into a dispatch error.
    ///
    /// Returns `None` when the list is empty.
    pub fn from_failures(mut failures: Vec<HandlerFailure>) -> Option<Self> {
        match failures.len() {
            0 => None,
            1 => failures.pop().map(DispatchError::Handler),
            _ => Some(DispatchError::Multiple(failures)),
        }
    }

    /// Iterate over every failed handler.
    pub fn failures(&self) -> impl Iterator<Item = &HandlerFailure> {
        match self {
            DispatchError::Handler(failure) => std::slice::from_ref(failure).iter(),
            DispatchError::Multiple(failures) => failures.iter(),
        }
    }

    /// Whether the handler for `field` is among the failures.
    pub fn failed_field(&self, field: &str) -> bool {
        self.failures().any(|f| f.field == field)
    }
}

/// Errors that can occur while building a handler map.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A handler slot already exists for this field.
    #[error("field already registered: {0}")]
    DuplicateField(String),

    /// The document type does not declare this field.
    #[error("document `{document}` has no field `{field}`")]
    UnknownField {
        /// The rejected field name.
        field: String,
        /// The document type name.
        document: &'static str,
    },
}

/// Errors that can occur while building a snapshot from a typed record.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The record could not be serialized.
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The record did not serialize to a JSON object.
    #[error("record serialized to {0}, expected an object")]
    NotAnObject(&'static str),
}

/// A field value could not be decoded into the type a handler expects.
#[derive(Error, Debug)]
#[error("failed to decode field `{field}`: {source}")]
pub struct DecodeError {
    /// The field being decoded.
    pub field: String,
    /// The underlying serde error.
    #[source]
    pub source: serde_json::Error,
}

// Convenience conversions
impl From<BoxError> for FieldwatchError {
    fn from(err: BoxError) -> Self {
        FieldwatchError::Custom(err)
    }
}

impl From<HandlerFailure> for DispatchError {
    fn from(failure: HandlerFailure) -> Self {
        DispatchError::Handler(failure)
    }
}

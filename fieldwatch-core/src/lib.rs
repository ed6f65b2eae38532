//! # fieldwatch-core
//!
//! Core traits for the fieldwatch field-change dispatcher.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! handler libraries that don't need the full `fieldwatch-std` implementation.
//!
//! # Building Blocks
//!
//! - [`Snapshot`] - one state of a record, possibly absent
//! - [`Change`] - the before/after pair handed to every handler
//! - [`FieldChange`] - the values of one changed field
//! - [`FieldHandler`] / [`DynFieldHandler`] - the endpoint invoked per field
//! - [`deep_equal`] - the structural comparison deciding what "changed" means
//! - [`Document`] - a typed record with a known field set
//!
//! # Error Types
//!
//! - [`FieldwatchError`] - Top-level error type
//! - [`DispatchError`] - Aggregate handler failure
//! - [`RegistrationError`] - Handler map construction errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod document;
mod equality;
mod error;
mod handler;
mod outcome;
mod snapshot;

// Re-exports
pub use document::Document;
pub use equality::{deep_equal, values_equal};
pub use error::{
    BoxError, DecodeError, DispatchError, FieldwatchError, HandlerFailure, RegistrationError,
    SnapshotError,
};
pub use handler::{DynFieldHandler, FieldChange, FieldHandler};
pub use outcome::IntoOutcome;
pub use serde_json::Value;
pub use snapshot::{Change, ChangeKind, DocumentSnapshot, Fields, Snapshot};

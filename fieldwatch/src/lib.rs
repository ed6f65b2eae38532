//! # fieldwatch - Field-Level Change Dispatch
//!
//! `fieldwatch` invokes per-field handlers when a document-style record is
//! updated. Given the record's state before and after the update and a map of
//! field names to handlers, it finds the fields whose values changed and runs
//! their handlers concurrently, collecting every outcome into one result.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldwatch::prelude::*;
//!
//! let handlers = FieldHandlers::<DocumentSnapshot>::builder()
//!     .on("status", handler_fn(|before, after, change| async move {
//!         notify_status(change.after.id(), before, after).await
//!     }))
//!     .on("tags", sync_fn(|_before, after, _change| reindex(after)))
//!     .build()?;
//!
//! let change = Change::from_records("order-17", Some(&old_order), Some(&new_order))?;
//! let report = handlers.dispatch(change).await?;
//! ```
//!
//! ## What Counts as a Change
//!
//! Field values are compared with [`deep_equal`]: objects by key set and
//! values, arrays element-wise in order, numbers by numeric value. A field
//! that is absent on one side and present on the other (even as `null`) has
//! changed; a field absent on both sides has not.
//!
//! ## Failure
//!
//! Every qualifying handler is started and runs to completion. If any of them
//! fails, [`FieldHandlers::dispatch`] returns a [`DispatchError`] listing every
//! failure.
//!
//! ## Features
//!
//! - `tracing` (default): structured logs for dispatch decisions
//! - `timeout`: [`TimeoutHandler`](handlers::TimeoutHandler)
//! - `macros`: `#[derive(Document)]`

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use fieldwatch_core::{
    // Error types
    BoxError,
    // Snapshots
    Change,
    ChangeKind,
    DecodeError,
    DispatchError,
    // Documents
    Document,
    DocumentSnapshot,
    // Handler
    DynFieldHandler,
    FieldChange,
    FieldHandler,
    FieldwatchError,
    Fields,
    HandlerFailure,
    IntoOutcome,
    RegistrationError,
    Snapshot,
    SnapshotError,
    Value,
    // Equality
    deep_equal,
    values_equal,
};

// Handler maps and dispatch
pub use fieldwatch_std::{
    dispatch::{DispatchReport, on_field_update},
    registry::{FieldHandlers, FieldHandlersBuilder, SharedHandler},
};

#[cfg(feature = "macros")]
pub use fieldwatch_macros::Document;

/// Standard handler adapters and wrappers.
pub mod handlers {
    #![allow(clippy::wildcard_imports)]
    pub use fieldwatch_std::handlers::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use fieldwatch_std::testing::*;
}

/// Prelude module - common imports for fieldwatch.
///
/// # Usage
///
/// ```rust,ignore
/// use fieldwatch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Change, DispatchError, DispatchReport, Document, DocumentSnapshot, FieldChange,
        FieldHandler, FieldHandlers, Fields, Snapshot, Value, on_field_update,
    };
    pub use fieldwatch_std::handlers::{LoggingHandler, handler_fn, sync_fn, typed};
}

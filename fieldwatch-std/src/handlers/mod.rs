//! Standard field handler adapters and wrappers.
//!
//! - [`handler_fn`] / [`sync_fn`] - `(before, after, change)` closures
//! - [`typed`] - closures over deserialized field values
//! - [`LoggingHandler`] - logs invocations and outcomes
//! - [`TimeoutHandler`] - bounds a handler's run time (feature `timeout`)

pub mod func;
pub mod logging;
#[cfg(feature = "timeout")]
pub mod timeout;
pub mod typed;

pub use func::{FnHandler, SyncFnHandler, handler_fn, sync_fn};
pub use logging::LoggingHandler;
#[cfg(feature = "timeout")]
pub use timeout::{TimeoutError, TimeoutHandler};
pub use typed::{Typed, typed};

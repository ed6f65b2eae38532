//! # fieldwatch-std
//!
//! Standard implementations for the fieldwatch field-change dispatcher.
//!
//! This crate provides:
//! - **Handler maps**: [`FieldHandlers`], [`FieldHandlersBuilder`]
//! - **Dispatch**: [`FieldHandlers::dispatch`], [`on_field_update`]
//! - **Handler adapters**: `handler_fn`, `sync_fn`, `typed`
//! - **Handler wrappers**: Logging, Timeout
//! - **Testing utilities**: recording, counting and failing handlers
//!
//! [`FieldHandlers`]: registry::FieldHandlers
//! [`FieldHandlersBuilder`]: registry::FieldHandlersBuilder
//! [`FieldHandlers::dispatch`]: registry::FieldHandlers::dispatch
//! [`on_field_update`]: dispatch::on_field_update

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use fieldwatch_core;

// Modules
pub mod dispatch;
pub mod handlers;
pub mod registry;
pub mod testing;

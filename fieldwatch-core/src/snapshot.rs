//! # Snapshots and Changes
//!
//! A [`Snapshot`] is one state of a document-style record. It either holds a
//! field mapping or reports that the record did not exist in that state.
//!
//! A [`Change`] pairs the state before an update with the state after it.
//! It is the context every field handler receives.
//!
//! # Provided Snapshots
//!
//! - [`DocumentSnapshot`] - an identified document with optional data
//! - [`Fields`] - a bare field map that always exists
//! - `Option<Fields>` - a bare field map that may be absent

use crate::{equality::deep_equal, error::SnapshotError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// A field mapping: field name to value.
pub type Fields = Map<String, Value>;

/// One state of a record.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a record `Snapshot`",
    label = "missing `Snapshot` implementation",
    note = "Snapshots must implement `data` to expose their field mapping."
)]
pub trait Snapshot: Send + Sync + 'static {
    /// The field mapping, or `None` if the record does not exist in this state.
    fn data(&self) -> Option<&Fields>;

    /// Whether the record exists in this state.
    fn exists(&self) -> bool {
        self.data().is_some()
    }

    /// The value of `field`, or `None` if the record or the field is absent.
    fn get(&self, field: &str) -> Option<&Value> {
        self.data()?.get(field)
    }
}

impl Snapshot for Fields {
    fn data(&self) -> Option<&Fields> {
        Some(self)
    }
}

impl Snapshot for Option<Fields> {
    fn data(&self) -> Option<&Fields> {
        self.as_ref()
    }
}

/// An identified document whose data may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    id: String,
    data: Option<Fields>,
}

impl DocumentSnapshot {
    /// Create a snapshot of an existing document.
    pub fn new(id: impl Into<String>, data: Fields) -> Self {
        Self {
            id: id.into(),
            data: Some(data),
        }
    }

    /// Create a snapshot of a document that does not exist.
    pub fn missing(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: None,
        }
    }

    /// Create a snapshot from a JSON value.
    ///
    /// `Value::Null` means the document does not exist; any other non-object
    /// value is rejected.
    pub fn from_value(id: impl Into<String>, value: Value) -> Result<Self, SnapshotError> {
        let data = match value {
            Value::Null => None,
            Value::Object(map) => Some(map),
            other => return Err(SnapshotError::NotAnObject(kind_name(&other))),
        };
        Ok(Self {
            id: id.into(),
            data,
        })
    }

    /// Create a snapshot from a typed record.
    ///
    /// `None` means the document does not exist. The record must serialize to
    /// a JSON object.
    pub fn from_record<T: Serialize>(
        id: impl Into<String>,
        record: Option<&T>,
    ) -> Result<Self, SnapshotError> {
        let id = id.into();
        let Some(record) = record else {
            return Ok(Self::missing(id));
        };
        match serde_json::to_value(record)? {
            Value::Object(map) => Ok(Self::new(id, map)),
            other => Err(SnapshotError::NotAnObject(kind_name(&other))),
        }
    }

    /// The document identifier.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Snapshot for DocumentSnapshot {
    fn data(&self) -> Option<&Fields> {
        self.data.as_ref()
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// How a record moved between its two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The record did not exist before and exists after.
    Create,
    /// The record exists in both states.
    Update,
    /// The record existed before and does not exist after.
    Delete,
    /// The record exists in neither state.
    Noop,
}

/// A before/after pair of snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Change<S> {
    /// The state before the update.
    pub before: S,
    /// The state after the update.
    pub after: S,
}

impl<S: Snapshot> Change<S> {
    /// Create a change from two snapshots.
    pub fn new(before: S, after: S) -> Self {
        Self { before, after }
    }

    /// Classify the change by record existence.
    pub fn kind(&self) -> ChangeKind {
        match (self.before.exists(), self.after.exists()) {
            (false, true) => ChangeKind::Create,
            (true, true) => ChangeKind::Update,
            (true, false) => ChangeKind::Delete,
            (false, false) => ChangeKind::Noop,
        }
    }

    /// Every field whose value differs between the two states, sorted by name.
    ///
    /// Considers the union of the field names of both states.
    pub fn changed_fields(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self
            .before
            .data()
            .into_iter()
            .chain(self.after.data())
            .flat_map(|fields| fields.keys().map(String::as_str))
            .collect();

        names
            .into_iter()
            .filter(|name| !deep_equal(self.before.get(name), self.after.get(name)))
            .collect()
    }
}

impl Change<DocumentSnapshot> {
    /// Create a change of one document from two typed records.
    pub fn from_records<T: Serialize>(
        id: impl Into<String>,
        before: Option<&T>,
        after: Option<&T>,
    ) -> Result<Self, SnapshotError> {
        let id = id.into();
        Ok(Self {
            before: DocumentSnapshot::from_record(id.clone(), before)?,
            after: DocumentSnapshot::from_record(id, after)?,
        })
    }
}

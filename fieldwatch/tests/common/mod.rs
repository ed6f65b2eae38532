#![allow(dead_code)]

use fieldwatch::{Change, DocumentSnapshot, FieldChange, FieldHandler, Fields, Value};
use serde::Serialize;
use serde_json::json;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

// ============================================================================
// Test Records
// ============================================================================

pub type Snap = DocumentSnapshot;

#[derive(Clone, Debug, Serialize)]
pub struct User {
    pub name: String,
    pub age: u32,
}

pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

pub fn doc(value: Value) -> DocumentSnapshot {
    DocumentSnapshot::new("doc-1", fields(value))
}

pub fn missing() -> DocumentSnapshot {
    DocumentSnapshot::missing("doc-1")
}

pub fn change(before: Value, after: Value) -> Change<Snap> {
    Change::new(doc(before), doc(after))
}

pub fn created(after: Value) -> Change<Snap> {
    Change::new(missing(), doc(after))
}

pub fn deleted(before: Value) -> Change<Snap> {
    Change::new(doc(before), missing())
}

pub fn s(value: &str) -> Option<Value> {
    Some(json!(value))
}

// ============================================================================
// Test Handlers
// ============================================================================

/// Records `(field, phase)` pairs so tests can check interleaving.
#[derive(Clone, Default)]
pub struct Timeline {
    entries: Arc<Mutex<Vec<(String, &'static str)>>>,
}

impl Timeline {
    pub fn push(&self, field: &str, phase: &'static str) {
        self.entries.lock().unwrap().push((field.to_owned(), phase));
    }

    pub fn entries(&self) -> Vec<(String, &'static str)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn position(&self, field: &str, phase: &str) -> usize {
        self.entries()
            .iter()
            .position(|(f, p)| f == field && *p == phase)
            .unwrap_or_else(|| panic!("no {phase} entry for {field}"))
    }
}

/// Sleeps before completing, recording when it started and finished.
pub struct DelayedHandler {
    pub delay: Duration,
    pub timeline: Timeline,
    pub fail: bool,
}

impl FieldHandler<Snap> for DelayedHandler {
    type Output = Result<(), String>;

    async fn call(&self, update: FieldChange<Snap>) -> Self::Output {
        self.timeline.push(update.field(), "start");
        tokio::time::sleep(self.delay).await;
        self.timeline.push(update.field(), "end");
        if self.fail {
            Err(format!("{} failed", update.field()))
        } else {
            Ok(())
        }
    }
}

use fieldwatch::{
    FieldHandlers,
    handlers::LoggingHandler,
    testing::{CountingHandler, FailingHandler},
};
use serde_json::json;
use std::{
    io,
    sync::{Arc, Mutex},
};
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

mod common;
use common::{Snap, change};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("fieldwatch_std=trace"))
        .with_test_writer()
        .try_init();
}

/// In-memory log sink shared with the subscriber.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(feature = "tracing")]
#[tokio::test]
async fn test_dispatch_emits_skip_and_invoke_events() {
    let captured = Captured::default();
    let writer = captured.clone();
    let _guard = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("fieldwatch_std=trace"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish()
        .set_default();

    let handlers = FieldHandlers::<Snap>::builder()
        .on("name", CountingHandler::new())
        .skip("age")
        .on("email", CountingHandler::new())
        .build()
        .unwrap();

    handlers
        .dispatch(change(
            json!({"name": "A", "age": 1, "email": "a@x"}),
            json!({"name": "B", "age": 2, "email": "a@x"}),
        ))
        .await
        .unwrap();

    let logs = captured.text();
    let line = |message: &str| {
        logs.lines()
            .find(|line| line.contains(message))
            .unwrap_or_else(|| panic!("no `{message}` event in:\n{logs}"))
            .to_owned()
    };

    let empty_slot = line("no handler in slot, skipping");
    assert!(empty_slot.contains("TRACE") && empty_slot.contains("age"));

    let unchanged = line("field unchanged, skipping");
    assert!(unchanged.contains("TRACE") && unchanged.contains("email"));

    let invoked = line("field changed, invoking handler");
    assert!(invoked.contains("DEBUG") && invoked.contains("name"));

    let summary = line("dispatching field changes");
    assert!(summary.contains("DEBUG"));
    assert!(summary.contains("registered=3") && summary.contains("invoked=1"));
}

#[tokio::test]
async fn test_dispatch_with_subscriber_installed() {
    init_tracing();

    let name = CountingHandler::new();
    let handlers = FieldHandlers::<Snap>::builder()
        .on("name", LoggingHandler::new(name.clone()))
        .skip("age")
        .on("email", LoggingHandler::new(CountingHandler::new()))
        .build()
        .unwrap();

    let report = handlers
        .dispatch(change(
            json!({"name": "A", "age": 1, "email": "a@x"}),
            json!({"name": "B", "age": 2, "email": "a@x"}),
        ))
        .await
        .unwrap();

    assert_eq!(report.invoked(), ["name".to_string()]);
    assert_eq!(name.count(), 1);
}

#[tokio::test]
async fn test_logging_wrapper_keeps_failures() {
    init_tracing();

    let handlers = FieldHandlers::<Snap>::builder()
        .on("score", LoggingHandler::new(FailingHandler::new("negative score")))
        .build()
        .unwrap();

    let err = handlers
        .dispatch(change(json!({"score": 1}), json!({"score": -1})))
        .await
        .unwrap_err();

    assert!(err.failed_field("score"));
    assert!(err.to_string().ends_with("negative score"));
}

use fieldwatch::{
    Change, ChangeKind, Document, DocumentSnapshot, FieldHandlers, RegistrationError,
    handlers::typed,
    testing::RecordingHandler,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, Mutex};

mod common;
use common::{Snap, User};

impl Document for User {
    const NAME: &'static str = "User";
    const FIELDS: &'static [&'static str] = &["name", "age"];
}

fn user(name: &str, age: u32) -> User {
    User {
        name: name.to_string(),
        age,
    }
}

#[tokio::test]
async fn test_dispatch_typed_records() {
    let name = RecordingHandler::<Snap>::new();
    let handlers = FieldHandlers::<Snap>::for_document::<User>()
        .on("name", name.clone())
        .skip("age")
        .build()
        .unwrap();

    let change = Change::from_records("u1", Some(&user("A", 1)), Some(&user("B", 2))).unwrap();
    assert_eq!(change.kind(), ChangeKind::Update);

    let report = handlers.dispatch(change).await.unwrap();
    assert_eq!(report.invoked(), ["name".to_string()]);
    assert_eq!(name.updates()[0].after(), Some(&json!("B")));
}

#[test]
fn test_document_handlers_reject_unknown_field() {
    let err = FieldHandlers::<Snap>::for_document::<User>()
        .on("nickname", RecordingHandler::<Snap>::new())
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        RegistrationError::UnknownField {
            field: "nickname".into(),
            document: "User",
        }
    );
    assert_eq!(err.to_string(), "document `User` has no field `nickname`");
}

#[tokio::test]
async fn test_typed_handler_receives_decoded_values() {
    let ages = Arc::new(Mutex::new(Vec::new()));
    let sink = ages.clone();
    let handlers = FieldHandlers::<Snap>::for_document::<User>()
        .on(
            "age",
            typed(move |before: Option<u32>, after: Option<u32>, _change: Arc<Change<Snap>>| {
                sink.lock().unwrap().push((before, after));
                async { Ok::<(), String>(()) }
            }),
        )
        .build()
        .unwrap();

    handlers
        .dispatch(Change::from_records("u1", None, Some(&user("A", 30))).unwrap())
        .await
        .unwrap();
    handlers
        .dispatch(Change::from_records("u1", Some(&user("A", 30)), Some(&user("A", 31))).unwrap())
        .await
        .unwrap();

    assert_eq!(*ages.lock().unwrap(), vec![(None, Some(30)), (Some(30), Some(31))]);
}

#[tokio::test]
async fn test_typed_handler_decode_failure_fails_dispatch() {
    #[derive(Deserialize)]
    struct Address {
        #[allow(dead_code)]
        city: String,
    }

    let handlers = FieldHandlers::<Snap>::builder()
        .on(
            "address",
            typed(
                |_before: Option<Address>, _after: Option<Address>, _change: Arc<Change<Snap>>| {
                    async {}
                },
            ),
        )
        .build()
        .unwrap();

    let change = Change::new(
        DocumentSnapshot::missing("u1"),
        DocumentSnapshot::from_value("u1", json!({"address": "not an object"})).unwrap(),
    );
    let err = handlers.dispatch(change).await.unwrap_err();

    assert!(err.failed_field("address"));
    let failure = err.failures().next().unwrap();
    assert!(
        failure
            .source
            .to_string()
            .starts_with("failed to decode field `address`")
    );
}

#[test]
fn test_changed_fields_of_typed_records() {
    let change = Change::from_records("u1", Some(&user("A", 1)), Some(&user("A", 2))).unwrap();
    assert_eq!(change.changed_fields(), vec!["age"]);

    let deleted = Change::from_records("u1", Some(&user("A", 1)), None).unwrap();
    assert_eq!(deleted.kind(), ChangeKind::Delete);
    assert_eq!(deleted.changed_fields(), vec!["age", "name"]);
}

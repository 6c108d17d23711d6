//! Stream classification integration tests
//!
//! Envelopes arrive as wire bytes and are classified into `StreamEvent`s.

use fauna_wire::{
    StreamEvent,
    stream::{self, ServiceErrorKind, StreamEventType},
    wire,
};

#[test]
fn test_start_event() {
    let event = stream::parse_event(br#"{"type": "start", "txn": 1, "event": 1}"#)
        .unwrap()
        .unwrap();
    assert_eq!(event, StreamEvent::Start { txn: 1, event: 1 });
}

#[test]
fn test_version_event_keeps_tagged_payload() {
    let input = br#"{
        "type": "version",
        "txn": 123,
        "event": {
            "action": "update",
            "document": {"ref": {"@ref": "classes/spells/42"}, "ts": 123}
        }
    }"#;
    let event = stream::parse_event(input).unwrap().unwrap();

    assert_eq!(event.event_type(), StreamEventType::Version);
    assert_eq!(event.txn(), 123);
    let document = event.document().unwrap();
    assert_eq!(document["action"], "update");
    let inner = document["document"].as_object().unwrap();
    assert_eq!(inner["ref"].as_ref_v().unwrap().id(), "classes/spells/42");
}

#[test]
fn test_history_rewrite_reports_its_own_type() {
    let event = stream::parse_event(
        br#"{"type": "history_rewrite", "txn": 9, "event": {"action": "delete"}}"#,
    )
    .unwrap()
    .unwrap();
    assert_eq!(event.event_type(), StreamEventType::HistoryRewrite);
    assert_ne!(event.event_type(), StreamEventType::Version);
}

#[test]
fn test_error_event() {
    let event = stream::parse_event(
        br#"{"type": "error", "txn": 5, "event": {"code": "permission denied", "description": "no access"}}"#,
    )
    .unwrap()
    .unwrap();

    match &event {
        StreamEvent::Error { txn, error } => {
            assert_eq!(*txn, 5);
            assert_eq!(error.kind(), ServiceErrorKind::PermissionDenied);
            assert_eq!(error.description(), "no access");
        }
        other => panic!("expected an error event, got {other:?}"),
    }
    assert!(event.to_string().starts_with("ErrorEvent{txn=5, error="));
}

#[test]
fn test_unknown_type_is_skipped() {
    let result = stream::parse_event(br#"{"type": "ping", "txn": 1}"#).unwrap();
    assert!(result.is_none());

    let result = stream::parse_event(br#"{"type": "heartbeat"}"#).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_malformed_envelopes() {
    let err = stream::parse_event(br#"{"txn": 1, "event": 1}"#).unwrap_err();
    assert!(err.is_not_found());

    let err = stream::parse_event(br#"{"type": "start", "txn": "1"}"#).unwrap_err();
    assert!(err.is_type_error());

    let err = stream::parse_event(br#"["start"]"#).unwrap_err();
    assert!(err.is_type_error());

    let err = stream::parse_event(br#"{"type": "start""#).unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn test_classify_value() {
    let value = wire::parse_str(r#"{"type": "start", "txn": 10, "event": 10}"#).unwrap();
    let event = stream::classify_value(&value).unwrap().unwrap();
    assert_eq!(event.txn(), 10);
}

#[test]
fn test_status_classification() {
    assert_eq!(
        ServiceErrorKind::from_status(400),
        Some(ServiceErrorKind::BadRequest)
    );
    assert_eq!(ServiceErrorKind::from_status(201), None);
    assert_eq!(ServiceErrorKind::from_code("something new"), ServiceErrorKind::Unknown);
}

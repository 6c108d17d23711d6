//! End-to-end tests on the reference document
//!
//! Parse, decode into a record, encode back, write, and re-read.

use chrono::{TimeZone, Utc};
use fauna_wire::{
    Error, FieldPath, Object, RefV, Value, field_path,
    mapper::{self, DecodeError},
    wire,
};

use crate::helpers::{REFERENCE_DOCUMENT, Reference, epoch_plus_two_days, reference_record};

#[test]
fn test_decode_reference_document() {
    let value = wire::parse_str(REFERENCE_DOCUMENT).unwrap();
    let record: Reference = value.get().unwrap();

    assert_eq!(record, reference_record());
    assert_eq!(record.reference.id(), "classes/spells/42");
    assert_eq!(record.date.date_naive(), epoch_plus_two_days());
    assert_eq!(record.time, Utc.timestamp_opt(0, 5).unwrap());
    assert_eq!(record.literal_obj["@name"], "@Jhon");
}

#[test]
fn test_extract_without_decoding() {
    let value = wire::parse_str(REFERENCE_DOCUMENT).unwrap();

    let nested = field_path!("ObjArr", 1usize, "Nested");
    assert_eq!(value.at(&nested).unwrap(), &"object2");

    let shortcut: FieldPath = "ObjArr[1].Nested".parse().unwrap();
    assert_eq!(value.get_at::<String>(&shortcut).unwrap(), "object2");

    assert_eq!(
        value.at(&FieldPath::key("Date")).unwrap(),
        &Value::Date(epoch_plus_two_days())
    );
}

#[test]
fn test_encode_write_and_reparse() {
    let record = reference_record();

    let mut wrapper = Object::new();
    wrapper.insert("data".to_string(), mapper::encode(&record).unwrap());
    let text = wire::to_string(&Value::Object(wrapper)).unwrap();

    assert!(text.contains(r#""Ref":{"@ref":"classes/spells/42"}"#));
    assert!(text.contains(r#""LiteralObj":{"@obj":{"@name":"@Jhon"}}"#));
    assert!(text.contains(r#""Time":{"@ts":"1970-01-01T00:00:00.000000005Z"}"#));
    assert!(text.contains(r#""Null":null"#));
    assert!(!text.contains("non_public_field"));

    let reparsed = wire::parse_str(&text).unwrap();
    let back: Reference = reparsed.get_at(&FieldPath::key("data")).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_excluded_field_is_reset_on_round_trip() {
    let mut record = reference_record();
    record.non_public_field = 42;

    let back: Reference = mapper::encode(&record).unwrap().get().unwrap();
    assert_eq!(back.non_public_field, 0);
}

#[test]
fn test_fractional_number_into_integer_field_fails() {
    let text = REFERENCE_DOCUMENT.replace(r#""Num": 31"#, r#""Num": 31.5"#);
    let value = wire::parse_str(&text).unwrap();

    let err = value.get::<Reference>().unwrap_err();
    assert!(err.is_type_error());
    assert_eq!(err.path(), "Num");

    let err: Error = err.into();
    assert_eq!(err.module(), "mapper");
}

#[test]
fn test_missing_required_ref() {
    let mut value = wire::parse_str(REFERENCE_DOCUMENT).unwrap();
    if let Value::Object(object) = &mut value {
        object.shift_remove("Ref");
    }

    let err = value.get::<Reference>().unwrap_err();
    assert_eq!(
        err,
        DecodeError::MissingField {
            record: "Reference",
            field: "Ref",
            path: String::new()
        }
    );
}

#[test]
fn test_any_field_accepts_every_value() {
    let text = REFERENCE_DOCUMENT.replace(
        r#""Any": "any value""#,
        r#""Any": {"@ref": "classes/spells/7"}"#,
    );
    let record: Reference = wire::parse_str(&text).unwrap().get().unwrap();
    assert_eq!(record.any, Value::Ref(RefV::new("classes/spells/7")));
}

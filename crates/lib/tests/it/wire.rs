//! Wire codec integration tests
//!
//! Parsing and serializing the extended JSON dialect.

use chrono::{NaiveDate, TimeZone, Utc};
use fauna_wire::{
    Error, Object, RefV, Value,
    wire::{self, WireError},
};

use crate::helpers::REFERENCE_DOCUMENT;

#[test]
fn test_parse_reference_document_tags() {
    let value = wire::parse_str(REFERENCE_DOCUMENT).unwrap();
    let object = value.as_object().unwrap();

    assert_eq!(object["Ref"], Value::Ref(RefV::new("classes/spells/42")));
    assert_eq!(
        object["Date"],
        Value::Date(NaiveDate::from_ymd_opt(1970, 1, 3).unwrap())
    );
    assert_eq!(object["Time"], Value::Timestamp(Utc.timestamp_opt(0, 5).unwrap()));
    assert_eq!(object["Num"], Value::Long(31));
    assert_eq!(object["Float"], Value::Double(31.1));
    assert_eq!(object["Null"], Value::Null);

    let literal = object["LiteralObj"].as_object().unwrap();
    assert_eq!(literal.len(), 1);
    assert_eq!(literal["@name"], "@Jhon");
}

#[test]
fn test_parse_keeps_key_order() {
    let value = wire::parse(br#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn test_large_unsigned_integer_becomes_double() {
    let value = wire::parse(b"18446744073709551615").unwrap();
    assert_eq!(value, Value::Double(18446744073709551615.0));
}

#[test]
fn test_ref_object_form_with_class_parent() {
    let value = wire::parse(br#"{"@ref": {"id": "42", "class": {"@ref": "classes/spells"}}}"#)
        .unwrap();
    let reference = value.as_ref_v().unwrap();
    assert_eq!(reference.id(), "42");
    assert_eq!(reference.parent(), Some(&RefV::new("classes/spells")));

    // Written back with the canonical parent key
    assert_eq!(
        wire::to_string(&value).unwrap(),
        r#"{"@ref":{"id":"42","collection":{"@ref":"classes/spells"}}}"#
    );
}

#[test]
fn test_serialize_plain_values() {
    let mut object = Object::new();
    object.insert("name".to_string(), Value::from("Fire"));
    object.insert("cost".to_string(), Value::Long(10));
    object.insert("ratio".to_string(), Value::Double(0.5));
    object.insert("tags".to_string(), Value::from(vec![Value::from(true), Value::Null]));

    assert_eq!(
        wire::to_string(&Value::Object(object)).unwrap(),
        r#"{"name":"Fire","cost":10,"ratio":0.5,"tags":[true,null]}"#
    );
}

#[test]
fn test_tag_like_keys_round_trip() {
    let mut object = Object::new();
    object.insert("@ref".to_string(), Value::from("not a ref"));
    let value = Value::Object(object);

    let text = wire::to_string(&value).unwrap();
    assert_eq!(text, r#"{"@obj":{"@ref":"not a ref"}}"#);
    assert_eq!(wire::parse_str(&text).unwrap(), value);
}

#[test]
fn test_round_trip_preserves_tags() {
    let value = wire::parse_str(REFERENCE_DOCUMENT).unwrap();
    let bytes = wire::to_vec(&value).unwrap();
    assert_eq!(wire::parse(&bytes).unwrap(), value);
}

#[test]
fn test_from_str_parses() {
    let value: Value = r#"{"@bytes": "AQID"}"#.parse().unwrap();
    assert_eq!(value, Value::Bytes(vec![1, 2, 3]));
}

#[test]
fn test_malformed_input_is_a_parse_error() {
    let inputs: [&[u8]; 5] = [b"{", b"[1, 2", b"{\"a\" 1}", b"", b"nul"];
    for input in inputs {
        let err = wire::parse(input).unwrap_err();
        assert!(err.is_parse_error(), "{input:?}");
        assert!(err.offset().unwrap() <= input.len());

        let crate_err: Error = err.into();
        assert!(crate_err.is_parse_error());
        assert_eq!(crate_err.module(), "wire");
    }
}

#[test]
fn test_bad_tag_payloads_fail() {
    for input in [
        r#"{"@ts": "yesterday"}"#,
        r#"{"@date": "1970-13-01"}"#,
        r#"{"@date": 3}"#,
        r#"{"@set": "x"}"#,
        r#"{"@bytes": "***"}"#,
        r#"{"@ref": 42}"#,
        r#"{"@ref": {"collection": {"@ref": "classes/spells"}}}"#,
    ] {
        assert!(wire::parse_str(input).is_err(), "{input} should be rejected");
    }
}

#[test]
fn test_obj_key_in_multi_key_object_is_plain_data() {
    let value = wire::parse_str(r#"{"@obj": 5, "x": 1}"#).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object["@obj"], Value::Long(5));
    assert_eq!(object["x"], Value::Long(1));

    let tagged_ref = Value::Ref(RefV::new("classes/spells/42"));
    for input in [
        r#"{"@obj": {"@ref": "classes/spells/42"}, "x": 1}"#,
        r#"{"x": 1, "@obj": {"@ref": "classes/spells/42"}}"#,
    ] {
        let value = wire::parse_str(input).unwrap();
        assert_eq!(value.as_object().unwrap()["@obj"], tagged_ref, "{input}");
    }
}

#[test]
fn test_obj_escape_reads_body_keys_literally() {
    let value = wire::parse_str(r#"{"@obj": {"@ref": "classes/spells/42"}}"#).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object["@ref"], Value::from("classes/spells/42"));

    let nested = wire::parse_str(r#"{"@obj": {"when": {"@date": "1970-01-03"}}}"#).unwrap();
    assert!(matches!(nested.as_object().unwrap()["when"], Value::Date(_)));

    assert!(wire::parse_str(r#"{"@obj": 5}"#).unwrap_err().is_parse_error());
}

#[test]
fn test_non_finite_doubles_are_not_written() {
    for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = wire::to_string(&Value::Double(n)).unwrap_err();
        assert!(matches!(err, WireError::Serialize { .. }), "{n}");
        assert!(wire::to_vec(&Value::from(vec![Value::Double(n)])).is_err());
    }
}

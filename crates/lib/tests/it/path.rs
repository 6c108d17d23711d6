//! Field path integration tests
//!
//! Building, printing, parsing and resolving `FieldPath`s against parsed documents.

use fauna_wire::{
    Error, FieldPath, Segment, Value, field_path,
    path::PathError,
    wire,
};

use crate::helpers::{Nested, REFERENCE_DOCUMENT};

fn document() -> Value {
    wire::parse_str(REFERENCE_DOCUMENT).unwrap()
}

#[test]
fn test_extract_nested_leaf() {
    let doc = document();
    let path = FieldPath::key("ObjArr").at_index(1).at_key("Nested");

    assert_eq!(doc.at(&path).unwrap(), &Value::from("object2"));
    assert_eq!(path.resolve(&doc).unwrap(), &Value::from("object2"));
}

#[test]
fn test_shared_prefix() {
    let doc = document();
    let matrix = FieldPath::key("Matrix");

    let corners: Vec<i64> = [(0, 0), (1, 1)]
        .iter()
        .map(|(row, col)| doc.get_at(&matrix.at_index(*row).at_index(*col)).unwrap())
        .collect();
    assert_eq!(corners, [1, 4]);
    assert_eq!(matrix.len(), 1);
}

#[test]
fn test_get_at_decodes_records() {
    let doc = document();
    let nested: Nested = doc.get_at(&field_path!("ObjArr", 0usize)).unwrap();
    assert_eq!(nested, Nested::new("object1"));

    let all: Vec<Nested> = doc.get_at(&FieldPath::key("ObjArr")).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_get_at_reports_lookup_and_decode_failures() {
    let doc = document();

    let err = doc.get_at::<String>(&FieldPath::key("Missing")).unwrap_err();
    assert!(matches!(err, Error::Path(PathError::MissingKey { .. })));
    assert!(err.is_not_found());

    let err = doc.get_at::<String>(&FieldPath::key("Num")).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
    assert!(err.is_type_error());
}

#[test]
fn test_tagged_values_are_leaves() {
    let doc = document();
    let err = doc.at(&field_path!("Ref", "id")).unwrap_err();
    assert_eq!(
        err,
        PathError::NotAContainer {
            segment: "key 'id'".to_string(),
            actual: "ref",
            at: "Ref".to_string()
        }
    );

    let err = doc.at(&field_path!("Object", 0usize)).unwrap_err();
    assert!(matches!(err, PathError::NotAContainer { actual: "object", .. }));
}

#[test]
fn test_join_and_parent() {
    let head = field_path!("data", "spells");
    let tail = field_path!(0usize, "name");
    let joined = head.join(&tail);

    assert_eq!(joined.to_string(), "data.spells[0].name");
    assert_eq!(joined.parent().unwrap().parent().unwrap(), head);
    assert_eq!(
        joined.segments(),
        &[
            Segment::from("data"),
            Segment::from("spells"),
            Segment::Index(0),
            Segment::from("name")
        ]
    );
    assert_eq!(head.join(&FieldPath::new()), head);
}

#[test]
fn test_text_form_round_trips() {
    for text in ["ObjArr[1].Nested", "Matrix[0][1]", "Map.key", "[3]"] {
        let path: FieldPath = text.parse().unwrap();
        assert_eq!(path.to_string(), text);
    }

    let dotted = FieldPath::key("a.b").at_key("c");
    assert_eq!(dotted.to_string(), r#"["a.b"].c"#);
    assert_eq!(dotted.to_string().parse::<FieldPath>().unwrap(), dotted);
    assert_eq!(FieldPath::new().to_string().parse::<FieldPath>().unwrap(), FieldPath::new());

    let doc = wire::parse_str(r#"{"a.b": {"c": 1}, "a": {"b": {"c": 2}}}"#).unwrap();
    assert_eq!(doc.at(&dotted).unwrap(), &Value::Long(1));
    let plain: FieldPath = "a.b.c".parse().unwrap();
    assert_eq!(doc.at(&plain).unwrap(), &Value::Long(2));

    let err = "ObjArr[one]".parse::<FieldPath>().unwrap_err();
    assert!(matches!(err, PathError::Syntax { .. }));
    assert!(Error::from(err).is_parse_error());
}

//! Shared fixtures for the integration tests.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fauna_wire::{Record, RefV, Value};

/// A document exercising every tag and container shape.
pub const REFERENCE_DOCUMENT: &str = r#"
{
    "Ref": {
        "@ref": "classes/spells/42"
    },
    "Any": "any value",
    "Date": { "@date": "1970-01-03" },
    "Time":  { "@ts": "1970-01-01T00:00:00.000000005Z" },
    "LiteralObj":  { "@obj": {"@name": "@Jhon" } },
    "tagged": "TaggedString",
    "Str": "Jhon Knows",
    "Num": 31,
    "Float": 31.1,
    "Boolean": true,
    "IntArr": [1, 2, 3],
    "ObjArr": [{"Nested": "object1"}, {"Nested": "object2"}],
    "Matrix": [[1, 2], [3, 4]],
    "Map": {
        "key": "value"
    },
    "Object": {
        "Nested": "object"
    },
    "Null": null
}
"#;

#[derive(Debug, Clone, PartialEq, Default, Record)]
pub struct Nested {
    #[fauna("Nested")]
    pub nested: String,
}

impl Nested {
    pub fn new(nested: &str) -> Self {
        Self {
            nested: nested.to_string(),
        }
    }
}

/// Host form of [`REFERENCE_DOCUMENT`].
#[derive(Debug, Clone, PartialEq, Record)]
pub struct Reference {
    #[fauna("NonExistingField")]
    pub non_existing_field: i64,
    #[fauna("-")]
    pub non_public_field: i64,
    #[fauna("tagged")]
    pub tagged_string: String,
    #[fauna("Any")]
    pub any: Value,
    #[fauna("Ref", required)]
    pub reference: RefV,
    #[fauna("Date")]
    pub date: DateTime<Utc>,
    #[fauna("Time")]
    pub time: DateTime<Utc>,
    #[fauna("LiteralObj")]
    pub literal_obj: HashMap<String, String>,
    #[fauna("Str")]
    pub str: String,
    #[fauna("Num")]
    pub num: i64,
    #[fauna("Float")]
    pub float: f64,
    #[fauna("Boolean")]
    pub boolean: bool,
    #[fauna("IntArr")]
    pub int_arr: Vec<i64>,
    #[fauna("ObjArr")]
    pub obj_arr: Vec<Nested>,
    #[fauna("Matrix")]
    pub matrix: Vec<Vec<i64>>,
    #[fauna("Map")]
    pub map: HashMap<String, String>,
    #[fauna("Object")]
    pub object: Nested,
    #[fauna("Null")]
    pub null: Option<Box<Nested>>,
}

/// The value [`REFERENCE_DOCUMENT`] decodes to.
pub fn reference_record() -> Reference {
    Reference {
        non_existing_field: 0,
        non_public_field: 0,
        tagged_string: "TaggedString".to_string(),
        any: Value::from("any value"),
        reference: RefV::new("classes/spells/42"),
        date: Utc.with_ymd_and_hms(1970, 1, 3, 0, 0, 0).unwrap(),
        time: Utc.timestamp_opt(0, 5).unwrap(),
        literal_obj: HashMap::from([("@name".to_string(), "@Jhon".to_string())]),
        str: "Jhon Knows".to_string(),
        num: 31,
        float: 31.1,
        boolean: true,
        int_arr: vec![1, 2, 3],
        obj_arr: vec![Nested::new("object1"), Nested::new("object2")],
        matrix: vec![vec![1, 2], vec![3, 4]],
        map: HashMap::from([("key".to_string(), "value".to_string())]),
        object: Nested::new("object"),
        null: None,
    }
}

pub fn epoch_plus_two_days() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 3).unwrap()
}

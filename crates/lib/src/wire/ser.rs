//! [`Value`] → extended JSON.

use base64ct::{Base64Url, Encoding};
use chrono::SecondsFormat;
use serde::ser::{Error as _, Serialize, SerializeMap, Serializer};

use crate::constants::{
    BYTES_TAG, DATE_FORMAT, DATE_TAG, OBJ_TAG, REF_ID_KEY, REF_PARENT_KEYS, REF_TAG, SET_TAG,
    TS_TAG,
};
use crate::value::{Object, RefV, Value};

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Long(n) => serializer.serialize_i64(*n),
            Value::Double(n) if !n.is_finite() => Err(S::Error::custom(format!(
                "cannot write non-finite double {n}"
            ))),
            Value::Double(n) => serializer.serialize_f64(*n),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Array(items) => serializer.collect_seq(items),
            Value::Object(object) => EscapedObject(object).serialize(serializer),
            Value::Ref(reference) => tagged(serializer, REF_TAG, reference),
            Value::SetRef(set) => tagged(serializer, SET_TAG, &EscapedObject(set.params())),
            Value::Timestamp(ts) => tagged(
                serializer,
                TS_TAG,
                &ts.to_rfc3339_opts(SecondsFormat::Nanos, true),
            ),
            Value::Date(date) => tagged(serializer, DATE_TAG, &date.format(DATE_FORMAT).to_string()),
            Value::Bytes(bytes) => tagged(serializer, BYTES_TAG, &Base64Url::encode_string(bytes)),
        }
    }
}

impl Serialize for RefV {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.parent() {
            None => serializer.serialize_str(self.id()),
            Some(parent) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry(REF_ID_KEY, self.id())?;
                map.serialize_entry(REF_PARENT_KEYS[0], &Value::Ref(parent.clone()))?;
                map.end()
            }
        }
    }
}

/// Writes `{"<tag>": payload}`.
fn tagged<S, T>(serializer: S, tag: &'static str, payload: &T) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize + ?Sized,
{
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(tag, payload)?;
    map.end()
}

/// An object body that is wrapped in `@obj` whenever one of its keys could
/// be mistaken for a tag.
struct EscapedObject<'a>(&'a Object);

impl Serialize for EscapedObject<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0.keys().any(|key| key.starts_with('@')) {
            tagged(serializer, OBJ_TAG, &PlainObject(self.0))
        } else {
            PlainObject(self.0).serialize(serializer)
        }
    }
}

struct PlainObject<'a>(&'a Object);

impl Serialize for PlainObject<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter())
    }
}

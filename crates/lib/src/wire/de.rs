//! Extended JSON → [`Value`].
//!
//! Objects are read key by key. When the first key is a reserved tag and no
//! second key follows, the object is replaced by the tagged variant it
//! encodes; otherwise it is kept as a plain [`Object`]. A reserved key in a
//! multi-key object carries no tag meaning, `@obj` included.

use std::fmt;

use base64ct::{Base64Url, Encoding};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::value::RawValue;

use crate::constants::{
    BYTES_TAG, DATE_FORMAT, DATE_TAG, OBJ_TAG, REF_ID_KEY, REF_PARENT_KEYS, REF_TAG, SET_TAG,
    TS_TAG,
};
use crate::value::{Object, RefV, SetRefV, Value};

impl<'de> de::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an extended JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Long(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        // Integers past i64::MAX cannot be a Long
        Ok(i64::try_from(v).map_or(Value::Double(v as f64), Value::Long))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Double(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        de::Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let Some(first_key) = map.next_key::<String>()? else {
            return Ok(Value::Object(Object::new()));
        };
        if first_key == OBJ_TAG {
            return visit_obj_tag(first_key, map);
        }
        let first_value = map.next_value::<Value>()?;

        let Some(second_key) = map.next_key::<String>()? else {
            return untag(first_key, first_value).map_err(de::Error::custom);
        };

        let mut object = Object::with_capacity(map.size_hint().unwrap_or(0) + 2);
        object.insert(first_key, first_value);
        object.insert(second_key, map.next_value()?);
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}

/// An object opening with `@obj` is an escape only when no second key
/// follows, so its first value is held raw until that is known.
fn visit_obj_tag<'de, A>(first_key: String, mut map: A) -> Result<Value, A::Error>
where
    A: MapAccess<'de>,
{
    let body: Box<RawValue> = map.next_value()?;

    let Some(second_key) = map.next_key::<String>()? else {
        let mut literal = serde_json::Deserializer::from_str(body.get());
        return LiteralObject
            .deserialize(&mut literal)
            .map(Value::Object)
            .map_err(de::Error::custom);
    };

    let first_value = serde_json::from_str::<Value>(body.get()).map_err(de::Error::custom)?;
    let mut object = Object::with_capacity(map.size_hint().unwrap_or(0) + 2);
    object.insert(first_key, first_value);
    object.insert(second_key, map.next_value()?);
    while let Some((key, value)) = map.next_entry::<String, Value>()? {
        object.insert(key, value);
    }
    Ok(Value::Object(object))
}

/// Reads the body of an `@obj` escape: its keys are data, its values are
/// ordinary extended JSON.
struct LiteralObject;

impl<'de> DeserializeSeed<'de> for LiteralObject {
    type Value = Object;

    fn deserialize<D>(self, deserializer: D) -> Result<Object, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for LiteralObject {
    type Value = Object;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an object body for {OBJ_TAG}")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Object, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut object = Object::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            object.insert(key, value);
        }
        Ok(object)
    }
}

/// Turns a single-key object into its tagged variant, or keeps it as an
/// object when the key is not reserved.
fn untag(key: String, payload: Value) -> Result<Value, String> {
    match key.as_str() {
        REF_TAG => ref_from_payload(payload).map(Value::Ref),
        TS_TAG => {
            let text = tag_text(TS_TAG, &payload)?;
            DateTime::parse_from_rfc3339(text)
                .map(|ts| Value::Timestamp(ts.with_timezone(&Utc)))
                .map_err(|err| format!("invalid {TS_TAG} payload '{text}': {err}"))
        }
        DATE_TAG => {
            let text = tag_text(DATE_TAG, &payload)?;
            NaiveDate::parse_from_str(text, DATE_FORMAT)
                .map(Value::Date)
                .map_err(|err| format!("invalid {DATE_TAG} payload '{text}': {err}"))
        }
        SET_TAG => match payload {
            Value::Object(params) => Ok(Value::SetRef(SetRefV::new(params))),
            other => Err(format!("{SET_TAG} expects an object, found {}", other.type_name())),
        },
        BYTES_TAG => {
            let text = tag_text(BYTES_TAG, &payload)?;
            Base64Url::decode_vec(text)
                .map(Value::Bytes)
                .map_err(|err| format!("invalid {BYTES_TAG} payload: {err}"))
        }
        _ => {
            let mut object = Object::with_capacity(1);
            object.insert(key, payload);
            Ok(Value::Object(object))
        }
    }
}

fn tag_text<'a>(tag: &str, payload: &'a Value) -> Result<&'a str, String> {
    payload
        .as_str()
        .ok_or_else(|| format!("{tag} expects a string, found {}", payload.type_name()))
}

/// Accepts both `{"@ref": "classes/spells/42"}` and
/// `{"@ref": {"id": "42", "collection": {"@ref": "classes/spells"}}}`.
fn ref_from_payload(payload: Value) -> Result<RefV, String> {
    match payload {
        Value::String(path) => Ok(RefV::new(path)),
        Value::Object(mut fields) => {
            let id = match fields.shift_remove(REF_ID_KEY) {
                Some(Value::String(id)) => id,
                Some(other) => {
                    return Err(format!(
                        "{REF_TAG} id must be a string, found {}",
                        other.type_name()
                    ));
                }
                None => return Err(format!("{REF_TAG} object is missing '{REF_ID_KEY}'")),
            };
            let parent = REF_PARENT_KEYS
                .iter()
                .find_map(|key| match fields.get(*key) {
                    Some(Value::Ref(parent)) => Some(parent.clone()),
                    _ => None,
                });
            Ok(match parent {
                Some(parent) => RefV::with_parent(id, parent),
                None => RefV::new(id),
            })
        }
        other => Err(format!(
            "{REF_TAG} expects a string or object, found {}",
            other.type_name()
        )),
    }
}

//! Extended JSON codec.
//!
//! Converts between raw bytes and the [`Value`] tree:
//!
//! | wire form                              | value                 |
//! |----------------------------------------|-----------------------|
//! | `{"@ref": "classes/spells/42"}`        | [`Value::Ref`]        |
//! | `{"@date": "1970-01-03"}`              | [`Value::Date`]       |
//! | `{"@ts": "1970-01-01T00:00:00.000000005Z"}` | [`Value::Timestamp`] |
//! | `{"@set": {...}}`                      | [`Value::SetRef`]     |
//! | `{"@bytes": "AQID"}`                   | [`Value::Bytes`]      |
//! | `{"@obj": {"@name": "@Jhon"}}`         | [`Value::Object`] with literal keys |
//!
//! Everything else is plain JSON. Integers become [`Value::Long`], numbers
//! with a fraction or exponent become [`Value::Double`].
//!
//! ```
//! # use fauna_wire::{wire, Value, RefV};
//! let value = wire::parse(br#"{"@ref": "classes/spells/42"}"#)?;
//! assert_eq!(value, Value::Ref(RefV::new("classes/spells/42")));
//! assert_eq!(wire::to_string(&value)?, r#"{"@ref":"classes/spells/42"}"#);
//! # Ok::<(), fauna_wire::wire::WireError>(())
//! ```

use std::str::FromStr;

use crate::value::Value;

mod de;
mod errors;
mod ser;

pub use errors::WireError;

/// Parses extended JSON bytes into a value tree.
pub fn parse(input: &[u8]) -> Result<Value, WireError> {
    serde_json::from_slice(input).map_err(|err| {
        let err = WireError::from_json(input, &err);
        tracing::debug!(offset = err.offset(), "extended JSON parse failed");
        err
    })
}

/// Parses an extended JSON string into a value tree.
pub fn parse_str(input: &str) -> Result<Value, WireError> {
    parse(input.as_bytes())
}

/// Serializes a value tree into extended JSON bytes.
pub fn to_vec(value: &Value) -> Result<Vec<u8>, WireError> {
    serde_json::to_vec(value).map_err(|err| WireError::Serialize {
        reason: err.to_string(),
    })
}

/// Serializes a value tree into an extended JSON string.
pub fn to_string(value: &Value) -> Result<String, WireError> {
    serde_json::to_string(value).map_err(|err| WireError::Serialize {
        reason: err.to_string(),
    })
}

impl FromStr for Value {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(s)
    }
}

//! The tagged wire-value tree.
//!
//! [`Value`] is the in-memory form of a document in the database's
//! extended-JSON dialect. Plain JSON scalars and containers map to the
//! obvious variants; the special single-key objects (`@ref`, `@ts`, `@date`,
//! `@set`, `@bytes`) map to dedicated variants so that no type information is
//! lost between the wire and the host.
//!
//! Parsing and serialization live in [`crate::wire`], host-type conversion in
//! [`crate::mapper`], and nested lookups in [`crate::path`].

use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use indexmap::IndexMap;

mod errors;
mod refs;

pub use errors::ValueError;
pub use refs::{RefV, SetRefV};

/// Insertion-ordered object body.
///
/// Order is kept so that re-serializing a parsed document reproduces its key
/// order.
pub type Object = IndexMap<String, Value>;

/// A value of the extended-JSON wire model.
///
/// # Value Types
///
/// ## Scalars
/// - [`Value::Null`], [`Value::Boolean`], [`Value::String`]
/// - [`Value::Long`] - 64-bit signed integer (JSON numbers without fraction or exponent)
/// - [`Value::Double`] - 64-bit float (every other JSON number)
///
/// ## Containers
/// - [`Value::Array`] - ordered sequence
/// - [`Value::Object`] - insertion-ordered string map
///
/// ## Tagged
/// - [`Value::Ref`], [`Value::SetRef`], [`Value::Timestamp`], [`Value::Date`], [`Value::Bytes`]
///
/// There is no numeric coercion at this level: `Long(1)` and `Double(1.0)`
/// are different values.
///
/// ```
/// # use fauna_wire::Value;
/// let name = Value::from("Jhon");
/// let age = Value::from(31);
///
/// assert!(name == "Jhon");
/// assert!(age == 31);
/// assert_eq!(age.as_long(), Some(31));
/// assert_eq!(age.as_double(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    String(String),
    Long(i64),
    Double(f64),
    Boolean(bool),
    Array(Vec<Value>),
    Object(Object),
    Ref(RefV),
    SetRef(SetRefV),
    /// UTC instant with nanosecond precision
    Timestamp(DateTime<Utc>),
    /// Calendar date without a time component
    Date(NaiveDate),
    Bytes(Vec<u8>),
}

impl Value {
    /// Returns the tag name of the active variant
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Long(_) => "long",
            Value::Double(_) => "double",
            Value::Boolean(_) => "boolean",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Ref(_) => "ref",
            Value::SetRef(_) => "set",
            Value::Timestamp(_) => "timestamp",
            Value::Date(_) => "date",
            Value::Bytes(_) => "bytes",
        }
    }

    /// Returns true if this value can hold children
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_ref_v(&self) -> Option<&RefV> {
        match self {
            Value::Ref(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_set_ref(&self) -> Option<&SetRefV> {
        match self {
            Value::SetRef(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Builds the mismatch error for a failed unwrap of this value
    pub(crate) fn mismatch(&self, expected: &'static str) -> ValueError {
        ValueError::TypeMismatch {
            expected,
            actual: self.type_name(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::String(s) => write!(f, "{s}"),
            Value::Long(n) => write!(f, "{n}"),
            Value::Double(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Object(object) => fmt_object(object, f),
            Value::Ref(reference) => write!(f, "ref({reference})"),
            Value::SetRef(set) => {
                write!(f, "set(")?;
                fmt_object(set.params(), f)?;
                write!(f, ")")
            }
            Value::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339_opts(SecondsFormat::Nanos, true)),
            Value::Date(date) => write!(f, "{date}"),
            Value::Bytes(bytes) => write!(f, "bytes({})", bytes.len()),
        }
    }
}

pub(crate) fn fmt_object(object: &Object, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (key, item)) in object.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{key}: {item}")?;
    }
    write!(f, "}}")
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Long(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Long(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<RefV> for Value {
    fn from(value: RefV) -> Self {
        Value::Ref(value)
    }
}

impl From<SetRefV> for Value {
    fn from(value: SetRefV) -> Self {
        Value::SetRef(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

// TryFrom implementations: unwrap a specific variant or report the mismatch
macro_rules! try_from_copy {
    ($target:ty, $variant:ident, $expected:literal) => {
        impl TryFrom<&Value> for $target {
            type Error = ValueError;

            fn try_from(value: &Value) -> Result<Self, Self::Error> {
                match value {
                    Value::$variant(inner) => Ok(*inner),
                    _ => Err(value.mismatch($expected)),
                }
            }
        }
    };
}

try_from_copy!(i64, Long, "long");
try_from_copy!(f64, Double, "double");
try_from_copy!(bool, Boolean, "boolean");
try_from_copy!(DateTime<Utc>, Timestamp, "timestamp");
try_from_copy!(NaiveDate, Date, "date");

impl TryFrom<&Value> for String {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(value.mismatch("string")),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = ValueError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(value.mismatch("string")),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a Object {
    type Error = ValueError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(object) => Ok(object),
            _ => Err(value.mismatch("object")),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a [Value] {
    type Error = ValueError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => Ok(items),
            _ => Err(value.mismatch("array")),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a RefV {
    type Error = ValueError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Ref(reference) => Ok(reference),
            _ => Err(value.mismatch("ref")),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a [u8] {
    type Error = ValueError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bytes(bytes) => Ok(bytes),
            _ => Err(value.mismatch("bytes")),
        }
    }
}

// PartialEq implementations for comparing Value with primitives
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::String(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Long(n) if n == other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        matches!(self, Value::Long(n) if *n == *other as i64)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Double(n) if n == other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Boolean(b) if b == other)
    }
}

// Reverse implementations for symmetry
impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

//! `Encode`/`Decode` implementations for standard host types.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::ops::Deref;

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;

use super::{Decode, DecodeError, Encode, EncodeError};
use crate::value::{Object, RefV, SetRefV, Value};

impl Encode for Value {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(self.clone())
    }
}

impl Decode for Value {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        Ok(value.clone())
    }
}

impl Encode for bool {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Boolean(*self))
    }
}

impl Decode for bool {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        value.as_bool().ok_or_else(|| DecodeError::mismatch::<Self>(value))
    }
}

impl Encode for str {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::String(self.to_string()))
    }
}

impl Encode for String {
    fn encode(&self) -> Result<Value, EncodeError> {
        self.as_str().encode()
    }
}

impl Decode for String {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DecodeError::mismatch::<Self>(value))
    }
}

/// Integers that always fit in a Long.
macro_rules! lossless_int {
    ($($ty:ty),*) => {$(
        impl Encode for $ty {
            fn encode(&self) -> Result<Value, EncodeError> {
                Ok(Value::Long(i64::from(*self)))
            }
        }
    )*};
}

/// Integers that may not fit in a Long.
macro_rules! wide_int {
    ($($ty:ty),*) => {$(
        impl Encode for $ty {
            fn encode(&self) -> Result<Value, EncodeError> {
                i64::try_from(*self)
                    .map(Value::Long)
                    .map_err(|_| EncodeError::out_of_range::<$ty>(self))
            }
        }
    )*};
}

/// Decoding from a Long, with a range check on the target width.
macro_rules! decode_int {
    ($($ty:ty),*) => {$(
        impl Decode for $ty {
            fn decode(value: &Value) -> Result<Self, DecodeError> {
                match value {
                    Value::Long(n) => {
                        <$ty>::try_from(*n).map_err(|_| DecodeError::out_of_range::<$ty>(n))
                    }
                    other => Err(DecodeError::mismatch::<$ty>(other)),
                }
            }
        }
    )*};
}

lossless_int!(i8, i16, i32, i64, u8, u16, u32);
wide_int!(isize, usize, u64, i128, u128);
decode_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, i128, u128);

impl Encode for f64 {
    fn encode(&self) -> Result<Value, EncodeError> {
        if self.is_finite() {
            Ok(Value::Double(*self))
        } else {
            Err(EncodeError::non_finite::<f64>(self))
        }
    }
}

impl Decode for f64 {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Double(n) => Ok(*n),
            Value::Long(n) => Ok(*n as f64),
            other => Err(DecodeError::mismatch::<f64>(other)),
        }
    }
}

impl Encode for f32 {
    fn encode(&self) -> Result<Value, EncodeError> {
        if self.is_finite() {
            Ok(Value::Double(f64::from(*self)))
        } else {
            Err(EncodeError::non_finite::<f32>(self))
        }
    }
}

impl Decode for f32 {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Double(n) if n.abs() > f64::from(f32::MAX) => {
                Err(DecodeError::out_of_range::<f32>(n))
            }
            Value::Double(n) => Ok(*n as f32),
            Value::Long(n) => Ok(*n as f32),
            other => Err(DecodeError::mismatch::<f32>(other)),
        }
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self) -> Result<Value, EncodeError> {
        match self {
            Some(inner) => inner.encode(),
            None => Ok(Value::Null),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(None),
            other => T::decode(other).map(Some),
        }
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self) -> Result<Value, EncodeError> {
        self.deref().encode()
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        T::decode(value).map(Box::new)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self) -> Result<Value, EncodeError> {
        (**self).encode()
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self) -> Result<Value, EncodeError> {
        self.iter()
            .enumerate()
            .map(|(idx, item)| item.encode().map_err(|err| err.within(idx)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self) -> Result<Value, EncodeError> {
        self.as_slice().encode()
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let items = value
            .as_array()
            .ok_or_else(|| DecodeError::mismatch::<Self>(value))?;
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| T::decode(item).map_err(|err| err.within(idx)))
            .collect()
    }
}

fn encode_entries<'a, V, I>(entries: I) -> Result<Value, EncodeError>
where
    V: Encode + 'a,
    I: Iterator<Item = (&'a String, &'a V)>,
{
    let mut object = Object::new();
    for (key, item) in entries {
        let encoded = item.encode().map_err(|err| err.within(key.as_str()))?;
        object.insert(key.clone(), encoded);
    }
    Ok(Value::Object(object))
}

fn decode_entries<V, C>(value: &Value) -> Result<C, DecodeError>
where
    V: Decode,
    C: FromIterator<(String, V)>,
{
    let object = value
        .as_object()
        .ok_or_else(|| DecodeError::mismatch::<C>(value))?;
    object
        .iter()
        .map(|(key, item)| {
            V::decode(item)
                .map(|decoded| (key.clone(), decoded))
                .map_err(|err| err.within(key.as_str()))
        })
        .collect()
}

impl<V: Encode, S> Encode for HashMap<String, V, S> {
    fn encode(&self) -> Result<Value, EncodeError> {
        encode_entries(self.iter())
    }
}

impl<V: Decode, S: BuildHasher + Default> Decode for HashMap<String, V, S> {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        decode_entries(value)
    }
}

impl<V: Encode> Encode for BTreeMap<String, V> {
    fn encode(&self) -> Result<Value, EncodeError> {
        encode_entries(self.iter())
    }
}

impl<V: Decode> Decode for BTreeMap<String, V> {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        decode_entries(value)
    }
}

impl<V: Encode, S> Encode for IndexMap<String, V, S> {
    fn encode(&self) -> Result<Value, EncodeError> {
        encode_entries(self.iter())
    }
}

impl<V: Decode, S: BuildHasher + Default> Decode for IndexMap<String, V, S> {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        decode_entries(value)
    }
}

impl Encode for RefV {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Ref(self.clone()))
    }
}

impl Decode for RefV {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        value
            .as_ref_v()
            .cloned()
            .ok_or_else(|| DecodeError::mismatch::<Self>(value))
    }
}

impl Encode for SetRefV {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::SetRef(self.clone()))
    }
}

impl Decode for SetRefV {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        value
            .as_set_ref()
            .cloned()
            .ok_or_else(|| DecodeError::mismatch::<Self>(value))
    }
}

impl Encode for DateTime<Utc> {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Timestamp(*self))
    }
}

impl Decode for DateTime<Utc> {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Timestamp(ts) => Ok(*ts),
            Value::Date(date) => Ok(date.and_time(chrono::NaiveTime::MIN).and_utc()),
            other => Err(DecodeError::mismatch::<Self>(other)),
        }
    }
}

impl Encode for NaiveDate {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Date(*self))
    }
}

impl Decode for NaiveDate {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        value
            .as_date()
            .ok_or_else(|| DecodeError::mismatch::<Self>(value))
    }
}

/// Host-side byte string, mapped to [`Value::Bytes`].
///
/// `Vec<u8>` maps to an array of longs like any other vector; wrap it in
/// `ByteBuf` to use the `@bytes` wire form instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteBuf(pub Vec<u8>);

impl Deref for ByteBuf {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ByteBuf {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Encode for ByteBuf {
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Bytes(self.0.clone()))
    }
}

impl Decode for ByteBuf {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        value
            .as_bytes()
            .map(|bytes| ByteBuf(bytes.to_vec()))
            .ok_or_else(|| DecodeError::mismatch::<Self>(value))
    }
}

//! Host value ⇄ [`Value`] mapping.
//!
//! [`Encode`] and [`Decode`] are implemented for the usual host types:
//! integers, floats, `bool`, strings, `Option`, `Vec`, string-keyed maps,
//! `chrono` timestamps and dates, references and [`Value`] itself. Record
//! types get both through `#[derive(Record)]`, which also gives them a
//! cached [`TypeDescriptor`].
//!
//! # Records
//!
//! ```
//! use fauna_wire::{Record, mapper, Value};
//!
//! #[derive(Debug, PartialEq, Record)]
//! struct Spell {
//!     #[fauna("Name", required)]
//!     name: String,
//!     #[fauna("tagged")]
//!     tagged_string: String,
//!     #[fauna("-")]
//!     cached_len: usize,
//!     level: Option<i32>,
//! }
//!
//! let spell = Spell {
//!     name: "Fire".into(),
//!     tagged_string: "hot".into(),
//!     cached_len: 4,
//!     level: Some(3),
//! };
//! let value = mapper::encode(&spell)?;
//! let object = value.as_object().unwrap();
//! assert_eq!(object["Name"], "Fire");
//! assert_eq!(object["tagged"], "hot");
//! assert!(!object.contains_key("cached_len"));
//!
//! let back: Spell = value.get()?;
//! assert_eq!(back.cached_len, 0);
//! assert_eq!(back.level, Some(3));
//! # Ok::<(), fauna_wire::Error>(())
//! ```
//!
//! # Decoding rules
//!
//! - `Long` decodes into any integer type that can hold it, and into floats.
//! - `Double` decodes into floats only.
//! - `Date` decodes into `DateTime<Utc>` at midnight.
//! - Anything narrower fails with [`DecodeError::OutOfRange`] or
//!   [`DecodeError::TypeMismatch`].
//! - A record field whose key is absent or `null` takes its
//!   `Default::default()`, unless the field is `required`.

mod descriptor;
mod errors;
mod impls;

pub use descriptor::{DescriptorCell, EXCLUDE, FieldDescriptor, FieldSpec, TypeDescriptor};
pub use errors::{DecodeError, EncodeError};
pub use impls::ByteBuf;

use crate::value::{Object, Value};

/// Conversion of a host value into the wire model.
pub trait Encode {
    fn encode(&self) -> Result<Value, EncodeError>;
}

/// Conversion of a wire value into a host value.
pub trait Decode: Sized {
    fn decode(value: &Value) -> Result<Self, DecodeError>;
}

/// A host record with named fields mapped to object keys.
///
/// Implemented by `#[derive(Record)]`; the descriptor is built on first
/// call and shared afterwards.
pub trait Record: Encode + Decode {
    fn descriptor() -> &'static TypeDescriptor;
}

/// Encodes a host value.
pub fn encode<T: Encode + ?Sized>(value: &T) -> Result<Value, EncodeError> {
    value.encode()
}

/// Decodes a host value.
pub fn decode<T: Decode>(value: &Value) -> Result<T, DecodeError> {
    T::decode(value)
}

impl Value {
    /// Decodes this value into `T`.
    pub fn get<T: Decode>(&self) -> Result<T, DecodeError> {
        T::decode(self)
    }
}

// Helpers called by `#[derive(Record)]` expansions.

/// Unwraps the object a record decodes from.
#[doc(hidden)]
pub fn record_object<'v, T: Record>(value: &'v Value) -> Result<&'v Object, DecodeError> {
    match value {
        Value::Object(object) => Ok(object),
        other => Err(DecodeError::TypeMismatch {
            expected: T::descriptor().type_name(),
            actual: other.type_name(),
            path: String::new(),
        }),
    }
}

/// Encodes one record field under its wire key.
#[doc(hidden)]
pub fn encode_field<T: Encode + ?Sized>(
    object: &mut Object,
    field: &FieldDescriptor,
    value: &T,
) -> Result<(), EncodeError> {
    let encoded = value.encode().map_err(|err| err.within(field.wire_key()))?;
    object.insert(field.wire_key().to_string(), encoded);
    Ok(())
}

/// Decodes an optional record field; absent and null keys yield the default.
#[doc(hidden)]
pub fn decode_field<T: Decode + Default>(
    object: &Object,
    field: &FieldDescriptor,
) -> Result<T, DecodeError> {
    match object.get(field.wire_key()) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => T::decode(value).map_err(|err| err.within(field.wire_key())),
    }
}

/// Decodes a required record field; absent and null keys are an error.
#[doc(hidden)]
pub fn decode_required_field<T: Decode>(
    object: &Object,
    descriptor: &TypeDescriptor,
    field: &FieldDescriptor,
) -> Result<T, DecodeError> {
    match object.get(field.wire_key()) {
        None | Some(Value::Null) => Err(DecodeError::MissingField {
            record: descriptor.type_name(),
            field: field.wire_key(),
            path: String::new(),
        }),
        Some(value) => T::decode(value).map_err(|err| err.within(field.wire_key())),
    }
}

//!
//! fauna-wire: the value core of a Fauna database client.
//! This library converts between the service's extended-JSON wire format and a typed value tree,
//! and maps that tree to and from plain Rust types.
//!
//! ## Core Concepts
//!
//! * **Values (`value::Value`)**: The closed set of wire values. Besides the JSON shapes it has
//!   references, set references, timestamps, dates and byte strings.
//! * **Wire codec (`wire`)**: Parses and serializes the extended-JSON dialect, where an object with
//!   a single reserved `@` key stands for a special value.
//! * **Mapper (`mapper`)**: The `Encode` and `Decode` traits, and `#[derive(Record)]` for structs whose
//!   fields map to object keys.
//! * **Field paths (`path::FieldPath`)**: Immutable key/index paths that pull one leaf out of a large
//!   value tree without decoding the rest.
//! * **Streams (`stream`)**: Classifies stream envelopes into typed `StreamEvent`s.
//!
//! ```
//! use fauna_wire::{Record, path::FieldPath, wire};
//!
//! #[derive(Debug, Record)]
//! struct Spell {
//!     name: String,
//!     level: i64,
//! }
//!
//! let value = wire::parse(br#"{"data": {"name": "Fire", "level": 3}}"#)?;
//! let spell: Spell = value.get_at(&FieldPath::key("data"))?;
//! assert_eq!(spell.name, "Fire");
//! # Ok::<(), fauna_wire::Error>(())
//! ```

// Lets `#[derive(Record)]` expansions name `::fauna_wire` from inside this crate.
extern crate self as fauna_wire;

pub mod constants;
pub mod mapper;
pub mod path;
pub mod stream;
pub mod value;
pub mod wire;

pub use mapper::{Decode, Encode, Record};
pub use path::{FieldPath, Segment};
pub use stream::StreamEvent;
pub use value::{Object, RefV, SetRefV, Value};

/// `#[derive(Record)]`, re-exported when the "derive" feature is enabled.
#[cfg(feature = "derive")]
pub use fauna_wire_derive::Record;

/// Result type used throughout the fauna-wire library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the fauna-wire library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Value accessor errors from the value module
    #[error(transparent)]
    Value(value::ValueError),

    /// Parse and serialize errors from the wire module
    #[error(transparent)]
    Wire(wire::WireError),

    /// Host-to-value errors from the mapper module
    #[error(transparent)]
    Encode(mapper::EncodeError),

    /// Value-to-host errors from the mapper module
    #[error(transparent)]
    Decode(mapper::DecodeError),

    /// Path build and lookup errors from the path module
    #[error(transparent)]
    Path(path::PathError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Value(_) => "value",
            Error::Wire(_) => "wire",
            Error::Encode(_) | Error::Decode(_) => "mapper",
            Error::Path(_) => "path",
        }
    }

    /// Check if this error indicates a field or element was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Path(path_err) => path_err.is_not_found(),
            Error::Decode(decode_err) => decode_err.is_missing_field(),
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Value(value_err) => value_err.is_type_error(),
            Error::Decode(decode_err) => decode_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error is a rejected numeric conversion.
    pub fn is_out_of_range(&self) -> bool {
        match self {
            Error::Decode(decode_err) => decode_err.is_out_of_range(),
            Error::Encode(encode_err) => encode_err.is_out_of_range(),
            _ => false,
        }
    }

    /// Check if this error comes from malformed wire text.
    pub fn is_parse_error(&self) -> bool {
        match self {
            Error::Wire(wire_err) => wire_err.is_parse_error(),
            Error::Path(path::PathError::Syntax { .. }) => true,
            _ => false,
        }
    }

    /// Check if this error is wire-related.
    pub fn is_wire_error(&self) -> bool {
        matches!(self, Error::Wire(_))
    }

    /// Check if this error is mapper-related.
    pub fn is_mapper_error(&self) -> bool {
        matches!(self, Error::Encode(_) | Error::Decode(_))
    }
}

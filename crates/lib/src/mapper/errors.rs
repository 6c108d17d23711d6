//! Error types for host value mapping.
//!
//! Both error enums carry the location of the failing element as a
//! rendered field path (`ObjArr[1].Nested`). Locations are built from the
//! inside out: the innermost conversion reports an empty path and each
//! enclosing record, sequence or map prepends its own segment.

use thiserror::Error;

use crate::path::Segment;

/// Errors raised while turning a host value into a [`Value`](crate::Value).
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EncodeError {
    /// An integer does not fit in a 64-bit Long
    #[error("cannot encode {type_name} value {value}: out of range for long{}", location(.path))]
    OutOfRange {
        type_name: &'static str,
        value: String,
        path: String,
    },

    /// NaN and infinities have no wire form
    #[error("cannot encode non-finite {type_name} value {value}{}", location(.path))]
    NonFinite {
        type_name: &'static str,
        value: String,
        path: String,
    },
}

impl EncodeError {
    pub(crate) fn out_of_range<T>(value: impl ToString) -> Self {
        EncodeError::OutOfRange {
            type_name: std::any::type_name::<T>(),
            value: value.to_string(),
            path: String::new(),
        }
    }

    pub(crate) fn non_finite<T>(value: impl ToString) -> Self {
        EncodeError::NonFinite {
            type_name: std::any::type_name::<T>(),
            value: value.to_string(),
            path: String::new(),
        }
    }

    /// Prefixes the error location with the segment of an enclosing container.
    pub fn within(mut self, segment: impl Into<Segment>) -> Self {
        match &mut self {
            EncodeError::OutOfRange { path, .. } | EncodeError::NonFinite { path, .. } => {
                prepend(path, &segment.into());
            }
        }
        self
    }

    /// The rendered path of the failing element, empty for the root
    pub fn path(&self) -> &str {
        match self {
            EncodeError::OutOfRange { path, .. } | EncodeError::NonFinite { path, .. } => path,
        }
    }

    /// The host type that could not be encoded
    pub fn type_name(&self) -> &'static str {
        match self {
            EncodeError::OutOfRange { type_name, .. } | EncodeError::NonFinite { type_name, .. } => {
                type_name
            }
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, EncodeError::OutOfRange { .. })
    }
}

/// Errors raised while turning a [`Value`](crate::Value) into a host value.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DecodeError {
    /// The value's tag cannot be decoded into the target type
    #[error("cannot decode {actual} into {expected}{}", location(.path))]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
        path: String,
    },

    /// The value would be narrowed by the target type
    #[error("cannot decode {value} into {target}: out of range{}", location(.path))]
    OutOfRange {
        target: &'static str,
        value: String,
        path: String,
    },

    /// A field marked required is absent or null
    #[error("missing required field '{field}' of {record}{}", location(.path))]
    MissingField {
        record: &'static str,
        field: &'static str,
        path: String,
    },
}

impl DecodeError {
    pub(crate) fn mismatch<T>(actual: &crate::Value) -> Self {
        DecodeError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            actual: actual.type_name(),
            path: String::new(),
        }
    }

    pub(crate) fn out_of_range<T>(value: impl ToString) -> Self {
        DecodeError::OutOfRange {
            target: std::any::type_name::<T>(),
            value: value.to_string(),
            path: String::new(),
        }
    }

    /// Prefixes the error location with the segment of an enclosing container.
    pub fn within(mut self, segment: impl Into<Segment>) -> Self {
        prepend(self.path_mut(), &segment.into());
        self
    }

    fn path_mut(&mut self) -> &mut String {
        match self {
            DecodeError::TypeMismatch { path, .. }
            | DecodeError::OutOfRange { path, .. }
            | DecodeError::MissingField { path, .. } => path,
        }
    }

    /// The rendered path of the failing element, empty for the root
    pub fn path(&self) -> &str {
        match self {
            DecodeError::TypeMismatch { path, .. }
            | DecodeError::OutOfRange { path, .. }
            | DecodeError::MissingField { path, .. } => path,
        }
    }

    /// Check if this error reports an absent required field
    pub fn is_missing_field(&self) -> bool {
        matches!(self, DecodeError::MissingField { .. })
    }

    /// Check if this error is a tag mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(self, DecodeError::TypeMismatch { .. })
    }

    /// Check if this error is a rejected narrowing
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, DecodeError::OutOfRange { .. })
    }
}

fn prepend(path: &mut String, segment: &Segment) {
    let mut rendered = segment.path_text();
    if !path.is_empty() && !path.starts_with('[') {
        rendered.push('.');
    }
    rendered.push_str(path);
    *path = rendered;
}

fn location(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" at {path}")
    }
}

impl From<EncodeError> for crate::Error {
    fn from(err: EncodeError) -> Self {
        crate::Error::Encode(err)
    }
}

impl From<DecodeError> for crate::Error {
    fn from(err: DecodeError) -> Self {
        crate::Error::Decode(err)
    }
}

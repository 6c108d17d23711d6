//! Field paths for extracting nested values.
//!
//! A [`FieldPath`] is an immutable list of object keys and array indices.
//! Paths are built by chaining, never mutated, and can be resolved against
//! any number of value trees. Resolution walks one segment per level, so
//! pulling a single leaf out of a large document costs O(depth) instead of a
//! full decode.
//!
//! ```
//! use fauna_wire::{field_path, path::FieldPath, wire};
//!
//! let doc = wire::parse(br#"{"ObjArr": [{"Nested": "object1"}, {"Nested": "object2"}]}"#)?;
//!
//! let nested = FieldPath::key("ObjArr").at_index(1).at_key("Nested");
//! assert_eq!(doc.at(&nested)?, &"object2");
//!
//! // Same path through the macro or from text
//! assert_eq!(field_path!("ObjArr", 1usize, "Nested"), nested);
//! assert_eq!("ObjArr[1].Nested".parse::<FieldPath>()?, nested);
//! # Ok::<(), fauna_wire::Error>(())
//! ```

use std::{fmt, str::FromStr, sync::Arc};

use thiserror::Error;

use crate::mapper::Decode;
use crate::value::Value;

/// How the empty path prints
const ROOT: &str = "(root)";

/// Errors raised while building or resolving a [`FieldPath`].
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// An object along the path has no such key
    #[error("field not found: key '{key}' is missing at {at}")]
    MissingKey { key: String, at: String },

    /// An array along the path is too short
    #[error("field not found: index {index} is out of bounds (len {len}) at {at}")]
    IndexOutOfBounds { index: usize, len: usize, at: String },

    /// A segment tried to descend into a scalar or tagged value
    #[error("field not found: cannot apply {segment} to a {actual} value at {at}")]
    NotAContainer {
        segment: String,
        actual: &'static str,
        at: String,
    },

    /// Text could not be parsed as a path
    #[error("invalid field path '{input}': {reason}")]
    Syntax { input: String, reason: String },
}

impl PathError {
    /// Check if this error reports an unresolvable segment
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PathError::MissingKey { .. }
                | PathError::IndexOutOfBounds { .. }
                | PathError::NotAContainer { .. }
        )
    }
}

impl From<PathError> for crate::Error {
    fn from(err: PathError) -> Self {
        crate::Error::Path(err)
    }
}

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "key '{key}'"),
            Segment::Index(index) => write!(f, "index {index}"),
        }
    }
}

impl Segment {
    /// A key that prints as-is in path text
    fn is_bare_key(&self) -> bool {
        match self {
            Segment::Key(key) => {
                !key.is_empty() && key != ROOT && !key.contains(['.', '[', ']', '"', '\\'])
            }
            Segment::Index(_) => false,
        }
    }

    /// The segment as written in path text, without a separating dot.
    ///
    /// Keys that are empty or contain path punctuation are quoted:
    /// `["a.b"]`, with `"` and `\` escaped by a backslash.
    pub(crate) fn path_text(&self) -> String {
        match self {
            Segment::Index(index) => format!("[{index}]"),
            Segment::Key(key) if self.is_bare_key() => key.clone(),
            Segment::Key(key) => {
                let mut text = String::with_capacity(key.len() + 4);
                text.push_str("[\"");
                for c in key.chars() {
                    if matches!(c, '"' | '\\') {
                        text.push('\\');
                    }
                    text.push(c);
                }
                text.push_str("\"]");
                text
            }
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

/// An immutable, composable lookup path.
///
/// Extending a path returns a new path and leaves the receiver unchanged,
/// so a common prefix can be shared by several lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Arc<[Segment]>,
}

impl FieldPath {
    /// Creates the empty path, which resolves to the root itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a path starting with an object key.
    pub fn key(key: impl Into<String>) -> Self {
        Self::new().at_key(key)
    }

    /// Creates a path starting with an array index.
    pub fn index(index: usize) -> Self {
        Self::new().at_index(index)
    }

    /// Returns a new path extending this one with an object key.
    pub fn at_key(&self, key: impl Into<String>) -> Self {
        self.at(Segment::Key(key.into()))
    }

    /// Returns a new path extending this one with an array index.
    pub fn at_index(&self, index: usize) -> Self {
        self.at(Segment::Index(index))
    }

    /// Returns a new path extending this one with any segment.
    pub fn at(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment.into());
        Self {
            segments: segments.into(),
        }
    }

    /// Returns a new path with every segment of `other` appended.
    pub fn join(&self, other: &FieldPath) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        let mut segments = self.segments.to_vec();
        segments.extend_from_slice(&other.segments);
        Self {
            segments: segments.into(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the path without its last segment, or `None` for the empty path.
    pub fn parent(&self) -> Option<FieldPath> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.into(),
        })
    }

    /// Follows the path from `root`.
    ///
    /// Fails on the first segment that cannot be applied; the error names
    /// that segment and the already-resolved prefix.
    pub fn resolve<'v>(&self, root: &'v Value) -> Result<&'v Value, PathError> {
        let mut current = root;
        for (depth, segment) in self.segments.iter().enumerate() {
            current = match (segment, current) {
                (Segment::Key(key), Value::Object(object)) => {
                    object.get(key).ok_or_else(|| PathError::MissingKey {
                        key: key.clone(),
                        at: self.prefix(depth),
                    })?
                }
                (Segment::Index(index), Value::Array(items)) => {
                    items.get(*index).ok_or_else(|| PathError::IndexOutOfBounds {
                        index: *index,
                        len: items.len(),
                        at: self.prefix(depth),
                    })?
                }
                (segment, other) => {
                    return Err(PathError::NotAContainer {
                        segment: segment.to_string(),
                        actual: other.type_name(),
                        at: self.prefix(depth),
                    });
                }
            };
        }
        Ok(current)
    }

    fn prefix(&self, depth: usize) -> String {
        Self {
            segments: self.segments[..depth].into(),
        }
        .to_string()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str(ROOT);
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && segment.is_bare_key() {
                f.write_str(".")?;
            }
            f.write_str(&segment.path_text())?;
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    /// Parses `key.key[index]["quoted key"]...`. Both the empty string and
    /// `(root)` are the empty path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = |reason: &str| PathError::Syntax {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        if s.is_empty() || s == ROOT {
            return Ok(Self::new());
        }

        let mut segments = Vec::new();
        let mut rest = s;
        while !rest.is_empty() {
            if let Some(bracketed) = rest.strip_prefix('[') {
                let (segment, tail) = parse_bracketed(bracketed).map_err(syntax)?;
                segments.push(segment);
                rest = tail;
                continue;
            }
            let body = if segments.is_empty() {
                rest
            } else {
                rest.strip_prefix('.')
                    .ok_or_else(|| syntax("expected '.' or '[' between segments"))?
            };
            let end = body.find(['.', '[']).unwrap_or(body.len());
            if end == 0 {
                return Err(syntax("empty key"));
            }
            segments.push(Segment::Key(body[..end].to_string()));
            rest = &body[end..];
        }
        Ok(Self {
            segments: segments.into(),
        })
    }
}

/// Reads `1]` or `"key"]` after an opening bracket.
fn parse_bracketed(input: &str) -> Result<(Segment, &str), &'static str> {
    let Some(quoted) = input.strip_prefix('"') else {
        let close = input.find(']').ok_or("unclosed '['")?;
        let index = input[..close]
            .parse::<usize>()
            .map_err(|_| "index must be a non-negative integer")?;
        return Ok((Segment::Index(index), &input[close + 1..]));
    };

    let mut key = String::new();
    let mut chars = quoted.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped @ ('"' | '\\'))) => key.push(escaped),
                _ => return Err("invalid escape in quoted key"),
            },
            '"' => {
                let tail = quoted[i + 1..]
                    .strip_prefix(']')
                    .ok_or("expected ']' after quoted key")?;
                return Ok((Segment::Key(key), tail));
            }
            c => key.push(c),
        }
    }
    Err("unclosed quoted key")
}

impl Value {
    /// Resolves `path` against this value.
    pub fn at(&self, path: &FieldPath) -> Result<&Value, PathError> {
        path.resolve(self)
    }

    /// Resolves `path` and decodes the value found there.
    pub fn get_at<T: Decode>(&self, path: &FieldPath) -> crate::Result<T> {
        let found = path.resolve(self)?;
        Ok(T::decode(found)?)
    }
}

/// Builds a [`FieldPath`] from keys and indices.
///
/// String expressions become keys, `usize` expressions become indices.
///
/// ```
/// # use fauna_wire::{field_path, path::FieldPath};
/// let path = field_path!("data", "spells", 0usize, "name");
/// assert_eq!(path.to_string(), "data.spells[0].name");
/// assert!(field_path!().is_empty());
/// ```
#[macro_export]
macro_rules! field_path {
    () => {
        $crate::path::FieldPath::new()
    };

    ($($segment:expr),+ $(,)?) => {{
        let path = $crate::path::FieldPath::new();
        $(
            let path = path.at($crate::path::Segment::from($segment));
        )+
        path
    }};
}

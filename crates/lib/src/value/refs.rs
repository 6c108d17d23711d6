//! Reference values: document/collection refs and set refs.

use std::fmt;

use super::{Object, Value};

/// A reference to a database entity.
///
/// The simplest form is a slash separated path such as `classes/spells/42`.
/// A reference may also carry the reference of its parent (for instance the
/// collection that owns a document), which is how the object form of `@ref`
/// is represented.
///
/// References are immutable once built.
///
/// ```
/// # use fauna_wire::RefV;
/// let spells = RefV::new("classes/spells");
/// let spell = RefV::with_parent("42", spells.clone());
///
/// assert_eq!(spell.id(), "42");
/// assert_eq!(spell.parent(), Some(&spells));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefV {
    id: String,
    parent: Option<Box<RefV>>,
}

impl RefV {
    /// Creates a reference without a parent.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: None,
        }
    }

    /// Creates a reference nested under `parent`.
    pub fn with_parent(id: impl Into<String>, parent: RefV) -> Self {
        Self {
            id: id.into(),
            parent: Some(Box::new(parent)),
        }
    }

    /// The id (or full path, for parentless references).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The parent reference, if any.
    pub fn parent(&self) -> Option<&RefV> {
        self.parent.as_deref()
    }
}

impl fmt::Display for RefV {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent {
            Some(parent) => write!(f, "{parent}/{}", self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

/// A set reference, identified by its parameter object.
#[derive(Debug, Clone, PartialEq)]
pub struct SetRefV {
    params: Object,
}

impl SetRefV {
    pub fn new(params: Object) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Object {
        &self.params
    }

    /// Looks up a single parameter.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }
}

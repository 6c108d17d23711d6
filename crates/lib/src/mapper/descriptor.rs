//! Per-type field descriptors.
//!
//! A record type declares its fields once, as a static table of
//! [`FieldSpec`]s emitted by `#[derive(Record)]`. The first time the type is
//! encoded or decoded the table is resolved into a [`TypeDescriptor`] and
//! published through the type's [`DescriptorCell`]. From then on every
//! caller, on any thread, reads the same immutable descriptor without
//! taking a lock.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Annotation value that removes a field from the wire form.
pub const EXCLUDE: &str = "-";

/// A field as declared on the host type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Host field name
    pub name: &'static str,
    /// Explicit wire key annotation, or [`EXCLUDE`]
    pub annotation: Option<&'static str>,
    /// Whether an absent key fails decoding instead of yielding the default
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, annotation: Option<&'static str>, required: bool) -> Self {
        Self {
            name,
            annotation,
            required,
        }
    }
}

/// A resolved field: host name, wire key and presence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    wire_key: &'static str,
    required: bool,
}

impl FieldDescriptor {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn wire_key(&self) -> &'static str {
        self.wire_key
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// The wire layout of one host record type.
///
/// Fields are kept in declaration order, which is also the order in which
/// keys are written when the record is encoded.
#[derive(Debug)]
pub struct TypeDescriptor {
    type_name: &'static str,
    fields: Vec<FieldDescriptor>,
    by_wire_key: HashMap<&'static str, usize>,
    excluded: Vec<&'static str>,
}

impl TypeDescriptor {
    /// Resolves a declared field table.
    ///
    /// The wire key is the field name unless an annotation overrides it; an
    /// annotation of [`EXCLUDE`] drops the field. When two fields resolve to
    /// the same wire key the first one wins lookups by key.
    pub fn build(type_name: &'static str, specs: &[FieldSpec]) -> Self {
        let mut fields = Vec::with_capacity(specs.len());
        let mut by_wire_key = HashMap::with_capacity(specs.len());
        let mut excluded = Vec::new();

        for spec in specs {
            let wire_key = match spec.annotation {
                Some(EXCLUDE) => {
                    excluded.push(spec.name);
                    continue;
                }
                Some(annotation) if !annotation.is_empty() => annotation,
                _ => spec.name,
            };
            if by_wire_key.contains_key(wire_key) {
                tracing::warn!(
                    record = type_name,
                    field = spec.name,
                    wire_key,
                    "duplicate wire key in record descriptor"
                );
            } else {
                by_wire_key.insert(wire_key, fields.len());
            }
            fields.push(FieldDescriptor {
                name: spec.name,
                wire_key,
                required: spec.required,
            });
        }

        Self {
            type_name,
            fields,
            by_wire_key,
            excluded,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Encoded fields, in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The `index`-th encoded field.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds. Generated code only passes
    /// indices taken from the same field table.
    pub fn field(&self, index: usize) -> &FieldDescriptor {
        &self.fields[index]
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Host fields that never appear on the wire
    pub fn excluded(&self) -> &[&'static str] {
        &self.excluded
    }

    /// Finds the field stored under a wire key
    pub fn by_wire_key(&self, wire_key: &str) -> Option<&FieldDescriptor> {
        self.by_wire_key.get(wire_key).map(|idx| &self.fields[*idx])
    }

    /// Returns the wire key of a host field, `None` if unknown or excluded
    pub fn wire_key_of(&self, field: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|descriptor| descriptor.name == field)
            .map(|descriptor| descriptor.wire_key)
    }
}

/// One-time publication slot for a [`TypeDescriptor`].
///
/// Generated code declares one `static` cell per record type.
#[derive(Debug)]
pub struct DescriptorCell {
    cell: OnceLock<TypeDescriptor>,
}

impl DescriptorCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Returns the published descriptor, building it on first use.
    pub fn get_or_build(&self, type_name: &'static str, specs: &[FieldSpec]) -> &TypeDescriptor {
        self.cell.get_or_init(|| {
            let descriptor = TypeDescriptor::build(type_name, specs);
            tracing::debug!(
                record = type_name,
                fields = descriptor.len(),
                excluded = descriptor.excluded().len(),
                "built record descriptor"
            );
            descriptor
        })
    }

    /// Returns the descriptor if it has already been published
    pub fn get(&self) -> Option<&TypeDescriptor> {
        self.cell.get()
    }
}

impl Default for DescriptorCell {
    fn default() -> Self {
        Self::new()
    }
}

//! Record classes: named record types with bases and declared fields.

use crate::{DeclarationError, FieldConstraint, Schema, SchemaRegistry};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter used to mint fresh [`ClassId`] values.
static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide identity of a record class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u64);

impl ClassId {
    fn fresh() -> Self {
        Self(NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

struct ClassInner {
    id: ClassId,
    name: String,
    bases: Vec<RecordClass>,
    fields: IndexMap<String, FieldConstraint>,
}

/// A record type.
///
/// Holds the class name, its direct bases in declaration order and the
/// fields it declares itself. Classes are immutable once built and cheap to
/// clone; two handles are equal only when they refer to the same class.
///
/// # Example
///
/// ```rust
/// use records_core::{FieldConstraint, Kind, RecordClass};
///
/// let point = RecordClass::builder("Point")
///     .field("x", FieldConstraint::of_kinds([Kind::Int, Kind::Float], false).unwrap())
///     .field("y", FieldConstraint::of_kinds([Kind::Int, Kind::Float], false).unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(point.name(), "Point");
/// assert_eq!(point.own_fields().len(), 2);
/// ```
#[derive(Clone)]
pub struct RecordClass {
    inner: Arc<ClassInner>,
}

impl RecordClass {
    /// Starts declaring a class named `name`.
    pub fn builder(name: impl Into<String>) -> RecordClassBuilder {
        RecordClassBuilder::new(name)
    }

    /// Returns the class identity.
    pub fn id(&self) -> ClassId {
        self.inner.id
    }

    /// Returns the class name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the direct bases in declaration order.
    pub fn bases(&self) -> &[RecordClass] {
        &self.inner.bases
    }

    /// Returns the fields declared by this class itself.
    pub fn own_fields(&self) -> &IndexMap<String, FieldConstraint> {
        &self.inner.fields
    }

    /// Returns the constraint this class itself declares for `field`.
    pub fn own_field(&self, field: &str) -> Option<&FieldConstraint> {
        self.inner.fields.get(field)
    }

    /// Returns this class and its ancestors, each once, most base first.
    ///
    /// The walk is a depth-first post-order over the bases, so every class
    /// comes after all of its own bases and this class comes last.
    pub fn linearize(&self) -> Vec<RecordClass> {
        fn visit(class: &RecordClass, seen: &mut HashSet<ClassId>, out: &mut Vec<RecordClass>) {
            if !seen.insert(class.id()) {
                return;
            }
            for base in class.bases() {
                visit(base, seen, out);
            }
            out.push(class.clone());
        }

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        visit(self, &mut seen, &mut out);
        out
    }

    /// Returns the flat schema of this class from the global registry.
    pub fn schema(&self) -> Arc<Schema> {
        SchemaRegistry::global().schema_for(self)
    }
}

impl PartialEq for RecordClass {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for RecordClass {}

impl Hash for RecordClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordClass")
            .field("id", &self.inner.id.0)
            .field("name", &self.inner.name)
            .finish()
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}

/// Builder for a [`RecordClass`].
///
/// Declaration problems are collected while chaining and reported by
/// [`build`](RecordClassBuilder::build), before any instance of the class
/// can exist.
#[derive(Debug)]
pub struct RecordClassBuilder {
    name: String,
    bases: Vec<RecordClass>,
    fields: IndexMap<String, FieldConstraint>,
    error: Option<DeclarationError>,
}

impl RecordClassBuilder {
    /// Creates a new class builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            fields: IndexMap::new(),
            error: None,
        }
    }

    /// Adds a direct base class.
    ///
    /// Listing the same base twice has no further effect.
    pub fn extends(mut self, base: &RecordClass) -> Self {
        if !self.bases.contains(base) {
            self.bases.push(base.clone());
        }
        self
    }

    /// Declares a field.
    pub fn field(mut self, name: impl Into<String>, constraint: FieldConstraint) -> Self {
        let name = name.into();
        if self.error.is_some() {
            return self;
        }
        if name.is_empty() {
            self.error = Some(DeclarationError::EmptyName);
        } else if self.fields.contains_key(&name) {
            self.error = Some(DeclarationError::DuplicateField {
                record: self.name.clone(),
                field: name,
            });
        } else {
            self.fields.insert(name, constraint);
        }
        self
    }

    /// Declares several fields.
    pub fn fields(
        self,
        fields: impl IntoIterator<Item = (impl Into<String>, FieldConstraint)>,
    ) -> Self {
        fields
            .into_iter()
            .fold(self, |builder, (name, constraint)| builder.field(name, constraint))
    }

    /// Builds the class.
    pub fn build(self) -> Result<RecordClass, DeclarationError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.name.is_empty() {
            return Err(DeclarationError::EmptyName);
        }

        let class = RecordClass {
            inner: Arc::new(ClassInner {
                id: ClassId::fresh(),
                name: self.name,
                bases: self.bases,
                fields: self.fields,
            }),
        };
        tracing::debug!(
            class = %class.name(),
            id = class.id().as_u64(),
            fields = class.own_fields().len(),
            bases = class.bases().len(),
            "declared record class"
        );
        Ok(class)
    }
}

//! Schema extraction.
//!
//! A class's schema is the union of the fields declared by the class and all
//! of its ancestors. Ancestors are linearized with a depth-first post-order
//! walk, so every class comes after all of its own bases, and own fields are
//! merged in that order. A more derived declaration therefore always replaces
//! an ancestor's declaration of the same field. When two unrelated bases
//! declare the same field, the base listed later wins.

use crate::{FieldConstraint, Kind, RecordClass};
use indexmap::IndexMap;
use serde::Serialize;

/// The flat field mapping of a record class.
#[derive(Debug, Clone)]
pub struct Schema {
    record: String,
    fields: IndexMap<String, FieldConstraint>,
}

impl Schema {
    /// Extracts the schema of `class`.
    ///
    /// This walks the whole ancestor graph; use the
    /// [`SchemaRegistry`](crate::SchemaRegistry) to share the result.
    pub fn extract(class: &RecordClass) -> Self {
        let mut fields = IndexMap::new();
        for ancestor in class.linearize() {
            for (name, constraint) in ancestor.own_fields() {
                fields.insert(name.clone(), constraint.clone());
            }
        }

        Self {
            record: class.name().to_string(),
            fields,
        }
    }

    /// Returns the name of the class this schema belongs to.
    pub fn record(&self) -> &str {
        &self.record
    }

    /// Returns the constraint of `field`.
    pub fn get(&self, field: &str) -> Option<&FieldConstraint> {
        self.fields.get(field)
    }

    /// Returns true if `field` is governed by this schema.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns field names in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns `(field, constraint)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldConstraint)> {
        self.fields.iter().map(|(name, c)| (name.as_str(), c))
    }

    /// Returns the underlying field mapping.
    pub fn fields(&self) -> &IndexMap<String, FieldConstraint> {
        &self.fields
    }

    /// Describes the schema for tooling.
    pub fn describe(&self) -> SchemaDescription {
        SchemaDescription {
            record: self.record.clone(),
            fields: self
                .fields
                .iter()
                .map(|(name, constraint)| FieldDescription {
                    name: name.clone(),
                    kinds: constraint
                        .kinds()
                        .into_iter()
                        .filter(|k| **k != Kind::Null)
                        .map(|k| k.name().to_string())
                        .collect(),
                    nullable: constraint.accepts_null(),
                })
                .collect(),
        }
    }
}

/// Serializable summary of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaDescription {
    /// Record class name
    pub record: String,
    /// Fields in schema order
    pub fields: Vec<FieldDescription>,
}

/// Serializable summary of one schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescription {
    /// Field name
    pub name: String,
    /// Names of the accepted kinds, without null
    pub kinds: Vec<String>,
    /// Whether null is accepted
    pub nullable: bool,
}

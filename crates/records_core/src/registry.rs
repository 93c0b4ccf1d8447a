//! Schema registry.
//!
//! Schemas are pure functions of their class, so the registry computes a
//! missing schema outside the lock and keeps whichever copy is inserted
//! first. Entries are never invalidated.

use crate::{ClassId, RecordClass, Schema};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Process-wide registry used by records.
static GLOBAL_REGISTRY: Lazy<SchemaRegistry> = Lazy::new(SchemaRegistry::new);

/// Cache of extracted schemas keyed by class identity.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<ClassId, Arc<Schema>>>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry.
    pub fn global() -> &'static SchemaRegistry {
        &GLOBAL_REGISTRY
    }

    /// Returns the schema of `class`, extracting it on first use.
    pub fn schema_for(&self, class: &RecordClass) -> Arc<Schema> {
        if let Some(schema) = self.schemas.read().get(&class.id()) {
            tracing::trace!(class = %class.name(), "schema cache hit");
            return Arc::clone(schema);
        }

        let computed = Arc::new(Schema::extract(class));
        let mut schemas = self.schemas.write();
        let schema = schemas.entry(class.id()).or_insert_with(|| {
            tracing::debug!(
                class = %class.name(),
                fields = computed.len(),
                "cached record schema"
            );
            Arc::clone(&computed)
        });
        Arc::clone(schema)
    }

    /// Returns true if the schema of `class` has been cached.
    pub fn contains(&self, class: &RecordClass) -> bool {
        self.schemas.read().contains_key(&class.id())
    }

    /// Returns the number of cached schemas.
    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    /// Returns true if no schema has been cached.
    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }
}

use super::SchemaRef;
use crate::error::{RowError, RowResult};
use std::collections::HashMap;
use std::sync::Arc;

/// Caller-owned registry of schemas, keyed by table name.
///
/// Populate it once during single-threaded startup, then share it read-only
/// (`&SchemaRegistry`) with everything that needs [`crate::init_db`] or lookups.
/// Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: Vec<SchemaRef>,
    by_table: HashMap<String, usize>,
}

impl SchemaRegistry {
    /// Create a new empty schema registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema.
    ///
    /// Fails with [`RowError::DuplicateTable`] if its table name is already taken;
    /// the registry is left unchanged in that case.
    pub fn register(&mut self, schema: SchemaRef) -> RowResult<()> {
        if let Some(&existing) = self.by_table.get(schema.table()) {
            let first = &self.schemas[existing];
            return Err(RowError::DuplicateTable {
                table: schema.table().to_string(),
                origin: first.origin().to_string(),
            });
        }

        tracing::debug!(
            target: "metarow.registry",
            table = schema.table(),
            fields = schema.width(),
            origin = schema.origin(),
            "registered schema"
        );
        self.by_table
            .insert(schema.table().to_string(), self.schemas.len());
        self.schemas.push(schema);
        Ok(())
    }

    /// Look up a schema by table name.
    pub fn get(&self, table: &str) -> Option<&SchemaRef> {
        self.by_table.get(table).map(|&i| &self.schemas[i])
    }

    pub fn contains(&self, table: &str) -> bool {
        self.by_table.contains_key(table)
    }

    /// Registered schemas in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaRef> {
        self.schemas.iter()
    }

    /// Get the number of registered tables.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Whether `schema` (the same allocation, not just the same table) is registered.
    pub fn holds(&self, schema: &SchemaRef) -> bool {
        self.get(schema.table())
            .is_some_and(|registered| Arc::ptr_eq(registered, schema))
    }
}

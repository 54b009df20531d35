//! Row schemas: fields, primary key, indexes and the table registry.
//!
//! # Example
//!
//! ```rust
//! use metarow::{Field, Index, RowSchema, SchemaRegistry};
//!
//! let mut registry = SchemaRegistry::new();
//! let ab = RowSchema::builder("ABRow")
//!     .field(Field::int("a"))
//!     .field(Field::int("b"))
//!     .pkey(["a"])
//!     .index(Index::on(["a", "b"]).using("gist"))
//!     .register(&mut registry)?;
//!
//! assert_eq!(ab.table(), "a_b_row");
//! assert!(registry.contains("a_b_row"));
//! # Ok::<(), metarow::RowError>(())
//! ```

mod field;
mod index;
mod name;
mod registry;

pub use field::{Field, FieldType, NativeKind};
pub use index::{Index, IndexDecl};
pub use name::table_name;
pub use registry::SchemaRegistry;

use crate::bindings::Bindings;
use crate::error::{RowError, RowResult};
use crate::ident::{check_ident, check_literal};
use crate::value::Value;
use std::collections::HashSet;
use std::panic::Location;
use std::sync::Arc;

/// Shared handle to a declared schema.
pub type SchemaRef = Arc<RowSchema>;

/// Declarative description of a table: ordered fields, primary key and indexes.
///
/// Schemas are immutable once built and are shared as [`SchemaRef`] by every row
/// created from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSchema {
    name: String,
    table: String,
    fields: Vec<Field>,
    pkey: Vec<String>,
    indexes: Vec<IndexDecl>,
    origin: String,
}

impl RowSchema {
    /// Start declaring a schema named `name` (camel case, e.g. `ABRow`).
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    /// Declared schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Table name derived from [`RowSchema::name`].
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::name)
    }

    /// Number of declared fields (the width of a `select *` row).
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    /// Primary-key field names in declaration order; empty when there is none.
    pub fn pkey(&self) -> &[String] {
        &self.pkey
    }

    pub fn indexes(&self) -> &[IndexDecl] {
        &self.indexes
    }

    /// Where the schema was declared (used in duplicate-table errors).
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Position of `field` in declaration order.
    pub fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.position(field).is_some()
    }

    /// Position of `field`, or [`RowError::UnknownField`].
    pub fn require_field(&self, field: &str) -> RowResult<usize> {
        self.position(field)
            .ok_or_else(|| RowError::unknown_field(&self.name, field))
    }

    /// Build the WHERE bindings selecting one row by primary key.
    ///
    /// Fails with [`RowError::PkeyMismatch`] when the number of values differs from
    /// the number of primary-key fields.
    pub fn pkey_where<I, V>(&self, values: I) -> RowResult<Bindings>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.len() != self.pkey.len() {
            return Err(RowError::PkeyMismatch {
                pkey: self.pkey.clone(),
                values,
            });
        }
        Ok(self.pkey.iter().cloned().zip(values).collect())
    }
}

/// Builder for [`RowSchema`].
#[derive(Debug, Clone)]
#[must_use]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<Field>,
    pkey: Vec<String>,
    indexes: Vec<IndexDecl>,
    origin: Option<String>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            pkey: Vec::new(),
            indexes: Vec::new(),
            origin: None,
        }
    }

    /// Append a field; accepts a [`Field`] or a `(name, NativeKind)` tuple.
    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn fields<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Set the primary key (ordered field names).
    pub fn pkey<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pkey = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Append an index: a raw statement or an [`Index`].
    pub fn index(mut self, index: impl Into<IndexDecl>) -> Self {
        self.indexes.push(index.into());
        self
    }

    /// Override the declaration origin reported in duplicate-table errors.
    ///
    /// Defaults to the source location of the `build`/`register` call.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Validate and build the schema without registering it.
    #[track_caller]
    pub fn build(self) -> RowResult<SchemaRef> {
        let caller = Location::caller();
        let origin = self
            .origin
            .unwrap_or_else(|| format!("{}:{}", caller.file(), caller.line()));

        check_ident(&self.name)?;
        let table = table_name(&self.name);
        check_ident(&table)?;

        let mut seen = HashSet::new();
        for field in &self.fields {
            check_ident(field.name())?;
            if !seen.insert(field.name()) {
                return Err(RowError::DuplicateField {
                    schema: self.name.clone(),
                    field: field.name().to_string(),
                });
            }
            if let FieldType::Enum(labels) = field.field_type() {
                check_enum_labels(&self.name, field.name(), labels)?;
            }
        }

        let mut pkey_seen = HashSet::new();
        for key in &self.pkey {
            if !seen.contains(key.as_str()) {
                return Err(RowError::unknown_field(&self.name, key));
            }
            if !pkey_seen.insert(key.as_str()) {
                return Err(RowError::DuplicateField {
                    schema: self.name.clone(),
                    field: key.clone(),
                });
            }
        }

        for decl in &self.indexes {
            if let IndexDecl::Index(index) = decl {
                if let Some(unknown) = index.fields().iter().find(|f| !seen.contains(f.as_str())) {
                    return Err(RowError::unknown_field(&self.name, unknown));
                }
            }
        }

        Ok(Arc::new(RowSchema {
            name: self.name,
            table,
            fields: self.fields,
            pkey: self.pkey,
            indexes: self.indexes,
            origin,
        }))
    }

    /// Build the schema and add it to `registry`.
    #[track_caller]
    pub fn register(self, registry: &mut SchemaRegistry) -> RowResult<SchemaRef> {
        let schema = self.build()?;
        registry.register(Arc::clone(&schema))?;
        Ok(schema)
    }
}

fn check_enum_labels(schema: &str, field: &str, labels: &[String]) -> RowResult<()> {
    if labels.is_empty() {
        return Err(RowError::usage(format!(
            "enum field '{field}' of {schema} declares no labels"
        )));
    }
    let mut seen = HashSet::new();
    for label in labels {
        check_literal(label)?;
        if !seen.insert(label.as_str()) {
            return Err(RowError::usage(format!(
                "enum field '{field}' of {schema} repeats label '{label}'"
            )));
        }
    }
    Ok(())
}

/// Declare a schema in one call, optionally registering it.
///
/// Equivalent to [`RowSchema::builder`] followed by `build` or `register`.
#[track_caller]
pub fn declare_schema<F, P, X>(
    name: &str,
    fields: F,
    pkey: P,
    indexes: X,
    registry: Option<&mut SchemaRegistry>,
) -> RowResult<SchemaRef>
where
    F: IntoIterator,
    F::Item: Into<Field>,
    P: IntoIterator,
    P::Item: Into<String>,
    X: IntoIterator,
    X::Item: Into<IndexDecl>,
{
    let mut builder = SchemaBuilder::new(name).fields(fields).pkey(pkey);
    for index in indexes {
        builder = builder.index(index);
    }
    match registry {
        Some(registry) => builder.register(registry),
        None => builder.build(),
    }
}

#[cfg(test)]
mod tests;

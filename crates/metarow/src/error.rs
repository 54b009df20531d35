//! Error types for metarow

use crate::value::Value;
use thiserror::Error;

/// Result type alias for metarow operations
pub type RowResult<T> = Result<T, RowError>;

/// Errors raised while declaring schemas, building rows or compiling statements.
///
/// Everything except [`RowError::Cursor`] (and the `postgres` variants) signals a
/// programmer or schema-definition mistake; none of them are transient.
#[derive(Debug, Error)]
pub enum RowError {
    /// Two schemas resolved to the same table name in one registry.
    #[error("Duplicate table '{table}' (first declared in {origin})")]
    DuplicateTable { table: String, origin: String },

    /// A schema declares the same field name twice.
    #[error("Duplicate field '{field}' in schema {schema}")]
    DuplicateField { schema: String, field: String },

    /// A projection, key or index references a field the schema does not declare.
    #[error("Unknown field '{field}' on schema {schema}")]
    UnknownField { schema: String, field: String },

    /// Assignment to a field outside the row's fixed field set.
    #[error("Cannot set undeclared field '{field}' on {schema}")]
    UndeclaredField { schema: String, field: String },

    /// More positional values than declared fields.
    #[error("Too many positional values: got {given}, {schema} declares {declared} fields")]
    ArgCount {
        schema: String,
        given: usize,
        declared: usize,
    },

    /// A field bound both positionally and by name (or by name twice).
    #[error("Field '{field}' already specified in position {position}")]
    DuplicateArg { field: String, position: usize },

    /// Primary-key values do not match the declared primary key.
    #[error("Primary key length mismatch: declared {pkey:?}, got {values:?}")]
    PkeyMismatch { pkey: Vec<String>, values: Vec<Value> },

    /// Joined schemas do not share an identical primary key.
    #[error("Cannot join {left} and {right}: primary keys differ")]
    JoinKeyMismatch { left: String, right: String },

    /// Identifier text is not a plain SQL identifier.
    #[error("Invalid identifier {0:?}")]
    InvalidIdentifier(String),

    /// Quoted identifiers are never escaped, so `"` cannot be represented.
    #[error("Don't know how to quote identifier {0:?}")]
    UnquotableIdentifier(String),

    /// A result row is narrower than the column layout expects.
    #[error("Result row has {actual} columns, expected at least {expected}")]
    RowWidth { expected: usize, actual: usize },

    /// Disallowed combination of arguments to a convenience wrapper.
    #[error("Usage error: {0}")]
    Usage(String),

    /// A database value could not be converted.
    #[error("Decode error on column {column}: {message}")]
    Decode { column: usize, message: String },

    /// Failure reported by a cursor implementation.
    #[error("Cursor error: {0}")]
    Cursor(String),

    /// PostgreSQL client error
    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    /// Runtime construction error for the blocking adapter
    #[cfg(feature = "postgres")]
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

impl RowError {
    /// Create an unknown-field error.
    pub fn unknown_field(schema: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            schema: schema.into(),
            field: field.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Create a cursor error.
    pub fn cursor(message: impl Into<String>) -> Self {
        Self::Cursor(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: usize, message: impl Into<String>) -> Self {
        Self::Decode {
            column,
            message: message.into(),
        }
    }

    /// Check if this is a duplicate table error
    pub fn is_duplicate_table(&self) -> bool {
        matches!(self, Self::DuplicateTable { .. })
    }

    /// Check if this is an unknown field error
    pub fn is_unknown_field(&self) -> bool {
        matches!(self, Self::UnknownField { .. })
    }

    /// Check if this is a usage error
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

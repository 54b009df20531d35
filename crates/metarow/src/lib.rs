//! # metarow
//!
//! Declarative row schemas compiled to parameterized SQL.
//!
//! ## Features
//!
//! - **Schemas as data**: a [`RowSchema`] is an ordered list of typed fields plus a
//!   primary key and indexes; the table name is derived from the schema name
//!   (`ABRow` → `a_b_row`)
//! - **Registry**: [`SchemaRegistry`] rejects two schemas claiming the same table
//! - **Rows with missing fields**: a [`Row`] keeps a [`Slot`] per field, and missing
//!   fields are left out of INSERTs
//! - **Pure compilation**: INSERT, equality SELECT, UPDATE, natural JOIN and DDL all
//!   compile to a [`Statement`] (SQL text plus ordered params) without touching a
//!   database
//! - **Marshalling**: run statements on any [`Cursor`] and get [`Row`]s back
//! - **Logging**: wrap a cursor in [`TracingCursor`] to emit each statement via
//!   `tracing`
//!
//! ## Example
//!
//! ```rust
//! use metarow::{Field, Index, Row, RowSchema, SchemaRegistry, StatementBuilder, insert, init_db};
//!
//! let mut registry = SchemaRegistry::new();
//! let ab = RowSchema::builder("ABRow")
//!     .fields([Field::int("a"), Field::int("b")])
//!     .pkey(["a"])
//!     .index(Index::on(["a", "b"]).using("gist"))
//!     .register(&mut registry)?;
//!
//! let ddl = init_db(&registry)?;
//! assert_eq!(ddl[0], r#"CREATE TABLE "a_b_row" (a int, b int, PRIMARY KEY (a))"#);
//!
//! let stmt = insert(&Row::new(&ab, [1, 3])?).returning(["a"]).build()?;
//! assert_eq!(stmt.sql, "insert into a_b_row (a,b) values (%s,%s) returning a");
//! # Ok::<(), metarow::RowError>(())
//! ```

pub mod bindings;
pub mod compile;
pub mod config;
pub mod cursor;
pub mod error;
pub mod ident;
pub mod marshal;
pub mod row;
pub mod schema;
pub mod stmt;
pub mod value;

#[cfg(feature = "postgres")]
pub mod pg;

pub use bindings::Bindings;
pub use compile::{
    InsertStmt, JoinStmt, SelectEq, Statement, StatementBuilder, UpdateEq, create_table,
    enum_type_name, init_db, insert, join, pkey, select_eq, update_eq,
};
pub use config::Placeholder;
pub use cursor::{Cursor, RecordingCursor, TracingCursor};
pub use error::{RowError, RowResult};
pub use marshal::{ColumnSpec, get, iter_models, marshal, select_joined_models, select_models};
pub use row::Row;
pub use schema::{
    Field, FieldType, Index, IndexDecl, NativeKind, RowSchema, SchemaBuilder, SchemaRef,
    SchemaRegistry, declare_schema, table_name,
};
pub use value::{Slot, Value};

#[cfg(feature = "postgres")]
pub use pg::PgCursor;

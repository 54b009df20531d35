//! Statement compiler.
//!
//! Every builder here is pure: it reads a schema (and row/bindings) and returns a
//! [`Statement`] holding SQL text plus the ordered bind parameters. Nothing touches a
//! database; hand the statement to a [`crate::Cursor`] or use the helpers in
//! [`crate::marshal`].
//!
//! ```rust
//! use metarow::{Field, Row, RowSchema, StatementBuilder, Value, insert, select_eq, update_eq};
//!
//! let ab = RowSchema::builder("ABRow")
//!     .fields([Field::int("a"), Field::int("b")])
//!     .pkey(["a"])
//!     .build()?;
//!
//! let stmt = insert(&Row::new(&ab, [1, 3])?).build()?;
//! assert_eq!(stmt.sql, "insert into a_b_row (a,b) values (%s,%s)");
//!
//! let stmt = select_eq(&ab, [("a", 3)]).build()?;
//! assert_eq!(stmt.sql, "select * from a_b_row where a=%s");
//!
//! let stmt = update_eq(&ab, [("a", 3)], [("b", 5)]).build()?;
//! assert_eq!(stmt.sql, "update a_b_row set b=%s where a=%s");
//! assert_eq!(stmt.params, [Value::Int(5), Value::Int(3)]);
//! # Ok::<(), metarow::RowError>(())
//! ```

mod ddl;
mod insert;
mod join;
mod select;
mod update;


pub use ddl::{create_table, enum_type_name, init_db};
pub use insert::{InsertStmt, insert};
pub use join::{JoinStmt, join};
pub use select::{SelectEq, pkey, select_eq};
pub use update::{UpdateEq, update_eq};

use crate::bindings::Bindings;
use crate::config::Placeholder;
use crate::error::RowResult;
use crate::value::Value;

/// Compiled SQL text plus its bind parameters, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

impl From<Statement> for (String, Vec<Value>) {
    fn from(stmt: Statement) -> Self {
        stmt.into_parts()
    }
}

/// Common interface of the statement builders.
pub trait StatementBuilder {
    /// Compile with an explicit placeholder style.
    fn build_with(&self, placeholder: Placeholder) -> RowResult<Statement>;

    /// Compile with the default placeholder style (`%s`).
    fn build(&self) -> RowResult<Statement> {
        self.build_with(Placeholder::default())
    }
}

/// Accumulates SQL text and parameters, numbering placeholders as they are bound.
pub(crate) struct SqlWriter {
    sql: String,
    params: Vec<Value>,
    placeholder: Placeholder,
}

impl SqlWriter {
    pub(crate) fn new(placeholder: Placeholder) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            placeholder,
        }
    }

    pub(crate) fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    pub(crate) fn push_bind(&mut self, value: Value) -> &mut Self {
        self.params.push(value);
        self.placeholder.write(&mut self.sql, self.params.len());
        self
    }

    /// `k1=?<sep>k2=?...`
    pub(crate) fn push_assignments(&mut self, bindings: &Bindings, sep: &str) -> &mut Self {
        for (i, (key, value)) in bindings.iter().enumerate() {
            if i > 0 {
                self.push(sep);
            }
            self.push(key).push("=").push_bind(value.clone());
        }
        self
    }

    /// ` where k1=? and k2=?`, or nothing for empty bindings.
    pub(crate) fn push_where(&mut self, bindings: &Bindings) -> &mut Self {
        if !bindings.is_empty() {
            self.push(" where ").push_assignments(bindings, " and ");
        }
        self
    }

    pub(crate) fn finish(self) -> Statement {
        Statement {
            sql: self.sql,
            params: self.params,
        }
    }
}

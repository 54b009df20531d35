use super::{SqlWriter, Statement, StatementBuilder};
use crate::config::Placeholder;
use crate::error::RowResult;
use crate::ident::check_ident;
use crate::row::Row;
use crate::value::Value;

/// INSERT of one row.
///
/// Columns are the row's non-missing fields in declaration order, followed by raw
/// fields in the order they were added. Raw fields are SQL expressions written
/// verbatim into VALUES and are never bound as parameters.
#[must_use]
pub struct InsertStmt<'a> {
    row: &'a Row,
    returning: Vec<String>,
    raw_fields: Vec<(String, String)>,
}

/// Start an INSERT for `row`.
pub fn insert(row: &Row) -> InsertStmt<'_> {
    InsertStmt {
        row,
        returning: Vec::new(),
        raw_fields: Vec::new(),
    }
}

enum ValueExpr<'v> {
    Bind(&'v Value),
    Raw(&'v str),
}

impl<'a> InsertStmt<'a> {
    /// Set RETURNING columns.
    pub fn returning<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.returning = cols.into_iter().map(Into::into).collect();
        self
    }

    /// Add a column whose value is the raw SQL expression `expr` (no params).
    ///
    /// A raw field named like a bound field of the row replaces that field's
    /// placeholder in place; otherwise it is appended after the row's fields.
    ///
    /// # Safety
    ///
    /// This directly concatenates SQL. The caller must ensure safety.
    pub fn raw(mut self, field: impl Into<String>, expr: impl Into<String>) -> Self {
        self.raw_fields.push((field.into(), expr.into()));
        self
    }
}

impl StatementBuilder for InsertStmt<'_> {
    fn build_with(&self, placeholder: Placeholder) -> RowResult<Statement> {
        let mut columns: Vec<(&str, ValueExpr<'_>)> = self
            .row
            .bound()
            .map(|(name, value)| (name, ValueExpr::Bind(value)))
            .collect();

        for (field, expr) in &self.raw_fields {
            check_ident(field)?;
            match columns.iter_mut().find(|(name, _)| *name == field.as_str()) {
                Some(slot) => slot.1 = ValueExpr::Raw(expr),
                None => columns.push((field.as_str(), ValueExpr::Raw(expr))),
            }
        }

        let mut w = SqlWriter::new(placeholder);
        w.push("insert into ").push(self.row.schema().table());

        if columns.is_empty() {
            w.push(" default values");
        } else {
            let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
            w.push(" (").push(&names.join(",")).push(") values (");
            for (i, (_, expr)) in columns.iter().enumerate() {
                if i > 0 {
                    w.push(",");
                }
                match expr {
                    ValueExpr::Bind(value) => w.push_bind((*value).clone()),
                    ValueExpr::Raw(sql) => w.push(sql),
                };
            }
            w.push(")");
        }

        if !self.returning.is_empty() {
            w.push(" returning ").push(&self.returning.join(","));
        }

        Ok(w.finish())
    }
}

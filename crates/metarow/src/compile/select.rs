use super::{SqlWriter, Statement, StatementBuilder};
use crate::bindings::Bindings;
use crate::config::Placeholder;
use crate::error::{RowError, RowResult};
use crate::schema::SchemaRef;
use crate::value::Value;
use std::sync::Arc;

/// `select <fields> from <table> [where ...] [order by ...] [limit n] [for update]`
///
/// All WHERE conditions are equalities joined with `and`, rendered in the order of
/// the bindings. For anything richer, write the SQL yourself.
#[derive(Debug, Clone)]
#[must_use]
pub struct SelectEq {
    schema: SchemaRef,
    where_: Bindings,
    fields: Vec<String>,
    for_update: bool,
    limit: Option<u64>,
    order: Option<String>,
}

/// Start an equality SELECT on `schema`.
pub fn select_eq(schema: &SchemaRef, where_: impl Into<Bindings>) -> SelectEq {
    SelectEq {
        schema: Arc::clone(schema),
        where_: where_.into(),
        fields: vec!["*".to_string()],
        for_update: false,
        limit: None,
        order: None,
    }
}

/// SELECT of the row(s) whose primary key equals `values`.
///
/// Fails with [`RowError::PkeyMismatch`] when the value count differs from the
/// declared primary key.
pub fn pkey<I, V>(schema: &SchemaRef, values: I) -> RowResult<SelectEq>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Ok(select_eq(schema, schema.pkey_where(values)?))
}

impl SelectEq {
    /// Projection list; `*` or declared field names.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn for_update(mut self) -> Self {
        self.for_update = true;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// ORDER BY expression, written verbatim.
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Whether the projection is the bare `*` (one column per declared field).
    pub fn is_wildcard(&self) -> bool {
        matches!(self.fields.as_slice(), [only] if only == "*")
    }
}

impl StatementBuilder for SelectEq {
    fn build_with(&self, placeholder: Placeholder) -> RowResult<Statement> {
        if self.fields.is_empty() {
            return Err(RowError::usage("select_eq needs at least one field"));
        }
        for field in &self.fields {
            if field != "*" {
                self.schema.require_field(field)?;
            }
        }
        for key in self.where_.keys() {
            self.schema.require_field(key)?;
        }

        let mut w = SqlWriter::new(placeholder);
        w.push("select ")
            .push(&self.fields.join(","))
            .push(" from ")
            .push(self.schema.table())
            .push_where(&self.where_);

        if let Some(order) = &self.order {
            w.push(" order by ").push(order);
        }
        if let Some(limit) = self.limit {
            w.push(" limit ").push(&limit.to_string());
        }
        if self.for_update {
            w.push(" for update");
        }

        Ok(w.finish())
    }
}

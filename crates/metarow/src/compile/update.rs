use super::{SqlWriter, Statement, StatementBuilder};
use crate::bindings::Bindings;
use crate::config::Placeholder;
use crate::error::{RowError, RowResult};
use crate::schema::SchemaRef;
use std::sync::Arc;

/// `update <table> set k1=?,k2=? [where ...]`
///
/// SET values are always bound parameters (never SQL expressions). Parameters are
/// the SET values followed by the WHERE values.
#[derive(Debug, Clone)]
#[must_use]
pub struct UpdateEq {
    schema: SchemaRef,
    where_: Bindings,
    updates: Bindings,
}

/// Start an equality UPDATE on `schema`.
pub fn update_eq(
    schema: &SchemaRef,
    where_: impl Into<Bindings>,
    updates: impl Into<Bindings>,
) -> UpdateEq {
    UpdateEq {
        schema: Arc::clone(schema),
        where_: where_.into(),
        updates: updates.into(),
    }
}

impl StatementBuilder for UpdateEq {
    fn build_with(&self, placeholder: Placeholder) -> RowResult<Statement> {
        if self.updates.is_empty() {
            return Err(RowError::usage("update_eq requires at least one SET field"));
        }
        for key in self.updates.keys().chain(self.where_.keys()) {
            self.schema.require_field(key)?;
        }

        let mut w = SqlWriter::new(placeholder);
        w.push("update ")
            .push(self.schema.table())
            .push(" set ")
            .push_assignments(&self.updates, ",")
            .push_where(&self.where_);

        Ok(w.finish())
    }
}

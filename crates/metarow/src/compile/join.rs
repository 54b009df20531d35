use super::{SqlWriter, Statement, StatementBuilder};
use crate::bindings::Bindings;
use crate::config::Placeholder;
use crate::error::{RowError, RowResult};
use crate::schema::SchemaRef;
use std::sync::Arc;

/// Natural join of tables sharing the same primary key.
///
/// `select t1.*,t2.*,... from t1 join t2 using (<pkey>) ... [where ...]`
#[derive(Debug, Clone)]
#[must_use]
pub struct JoinStmt {
    schemas: Vec<SchemaRef>,
    where_: Bindings,
}

/// Join `schemas` (at least two, identical primary keys) filtered by `where_`.
pub fn join(schemas: &[&SchemaRef], where_: impl Into<Bindings>) -> JoinStmt {
    JoinStmt {
        schemas: schemas.iter().map(|s| Arc::clone(s)).collect(),
        where_: where_.into(),
    }
}

impl JoinStmt {
    /// Joined schemas in the order their columns appear in each result row.
    pub fn schemas(&self) -> &[SchemaRef] {
        &self.schemas
    }

    fn check(&self) -> RowResult<&[String]> {
        let [first, rest @ ..] = self.schemas.as_slice() else {
            return Err(RowError::usage("join needs at least two schemas"));
        };
        if rest.is_empty() {
            return Err(RowError::usage("join needs at least two schemas"));
        }
        if first.pkey().is_empty() {
            return Err(RowError::usage(format!(
                "cannot join {}: it has no primary key",
                first.name()
            )));
        }
        if let Some(other) = rest.iter().find(|s| s.pkey() != first.pkey()) {
            return Err(RowError::JoinKeyMismatch {
                left: first.name().to_string(),
                right: other.name().to_string(),
            });
        }
        for key in self.where_.keys() {
            if !self.schemas.iter().any(|s| s.has_field(key)) {
                return Err(RowError::unknown_field(first.name(), key));
            }
        }
        Ok(first.pkey())
    }
}

impl StatementBuilder for JoinStmt {
    fn build_with(&self, placeholder: Placeholder) -> RowResult<Statement> {
        let pkey = self.check()?.join(",");

        let star: Vec<String> = self
            .schemas
            .iter()
            .map(|s| format!("{}.*", s.table()))
            .collect();

        let mut w = SqlWriter::new(placeholder);
        w.push("select ")
            .push(&star.join(","))
            .push(" from ")
            .push(self.schemas[0].table());
        for schema in &self.schemas[1..] {
            w.push(" join ")
                .push(schema.table())
                .push(" using (")
                .push(&pkey)
                .push(")");
        }
        w.push_where(&self.where_);

        Ok(w.finish())
    }
}

use super::Cursor;
use crate::config::Placeholder;
use crate::error::RowResult;
use crate::value::Value;
use tracing::Level;

fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// A cursor wrapper that emits every statement through `tracing` before executing it.
///
/// Events use target `metarow.sql` with fields `param_count` and `sql`. Failures of
/// the inner cursor are logged at `WARN` and returned unchanged.
#[derive(Debug)]
pub struct TracingCursor<C> {
    inner: C,
    /// Tracing event level to emit at.
    level: Level,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    max_sql_length: Option<usize>,
}

impl<C: Cursor> TracingCursor<C> {
    /// Wrap `inner`, logging at `DEBUG` and truncating SQL to 200 bytes.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    fn display_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }

    fn emit(&self, sql: &str, param_count: usize) {
        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let sql = self.display_sql(sql);
        emit_at_level!(
            self.level,
            target: "metarow.sql",
            param_count,
            sql = %sql,
        );
    }
}

impl<C: Cursor> Cursor for TracingCursor<C> {
    fn execute(&mut self, sql: &str, params: &[Value]) -> RowResult<()> {
        self.emit(sql, params.len());
        self.inner.execute(sql, params).inspect_err(|err| {
            tracing::warn!(target: "metarow.sql", error = %err, "statement failed");
        })
    }

    fn fetch_all(&mut self) -> RowResult<Vec<Vec<Value>>> {
        self.inner.fetch_all()
    }

    fn placeholder(&self) -> Placeholder {
        self.inner.placeholder()
    }
}

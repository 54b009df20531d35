use super::Cursor;
use crate::compile::Statement;
use crate::config::Placeholder;
use crate::error::{RowError, RowResult};
use crate::value::Value;
use std::collections::VecDeque;

/// In-memory cursor that records executed statements and replays scripted results.
///
/// Each [`Cursor::execute`] consumes the next scripted result (or none, producing an
/// empty result set). Useful for testing code built on metarow without a database.
///
/// ```rust
/// use metarow::{Cursor, RecordingCursor, Value};
///
/// let mut cursor = RecordingCursor::new().with_rows(vec![vec![Value::Int(1)]]);
/// cursor.execute("select 1", &[])?;
/// assert_eq!(cursor.fetch_all()?, vec![vec![Value::Int(1)]]);
/// assert_eq!(cursor.executed()[0].sql, "select 1");
/// # Ok::<(), metarow::RowError>(())
/// ```
#[derive(Debug, Default)]
pub struct RecordingCursor {
    placeholder: Placeholder,
    executed: Vec<Statement>,
    scripted: VecDeque<Result<Vec<Vec<Value>>, String>>,
    pending: Vec<Vec<Value>>,
}

impl RecordingCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `placeholder` as this cursor's style.
    pub fn placeholder_style(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Queue the result set of the next unscripted `execute`.
    pub fn with_rows(mut self, rows: Vec<Vec<Value>>) -> Self {
        self.scripted.push_back(Ok(rows));
        self
    }

    /// Queue a failure for the next unscripted `execute`.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.scripted.push_back(Err(message.into()));
        self
    }

    /// Statements executed so far, oldest first.
    pub fn executed(&self) -> &[Statement] {
        &self.executed
    }

    /// Prime the cursor with rows without executing anything.
    pub fn set_pending(&mut self, rows: Vec<Vec<Value>>) {
        self.pending = rows;
    }
}

impl Cursor for RecordingCursor {
    fn execute(&mut self, sql: &str, params: &[Value]) -> RowResult<()> {
        self.executed.push(Statement {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
        match self.scripted.pop_front() {
            Some(Ok(rows)) => {
                self.pending = rows;
                Ok(())
            }
            Some(Err(message)) => {
                self.pending.clear();
                Err(RowError::cursor(message))
            }
            None => {
                self.pending.clear();
                Ok(())
            }
        }
    }

    fn fetch_all(&mut self) -> RowResult<Vec<Vec<Value>>> {
        Ok(std::mem::take(&mut self.pending))
    }

    fn placeholder(&self) -> Placeholder {
        self.placeholder
    }
}

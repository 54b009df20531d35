//! The synchronous cursor collaborator.
//!
//! metarow never opens connections. Anything that can run a statement and hand back
//! fixed-width rows implements [`Cursor`]; the helpers in [`crate::marshal`] drive it.

mod recording;
mod traced;

pub use recording::RecordingCursor;
pub use traced::TracingCursor;

use crate::compile::Statement;
use crate::config::Placeholder;
use crate::error::RowResult;
use crate::value::Value;

/// A plain synchronous database cursor.
///
/// Rows returned by [`Cursor::fetch_all`] must list columns in the order of the
/// executed statement's select / returning list.
pub trait Cursor {
    /// Execute `sql` with positional `params`.
    fn execute(&mut self, sql: &str, params: &[Value]) -> RowResult<()>;

    /// Drain the rows produced by the last [`Cursor::execute`].
    fn fetch_all(&mut self) -> RowResult<Vec<Vec<Value>>>;

    /// Placeholder style this cursor's driver understands.
    fn placeholder(&self) -> Placeholder {
        Placeholder::Format
    }

    /// Execute a compiled statement.
    fn run(&mut self, stmt: &Statement) -> RowResult<()> {
        self.execute(&stmt.sql, &stmt.params)
    }
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn execute(&mut self, sql: &str, params: &[Value]) -> RowResult<()> {
        (**self).execute(sql, params)
    }

    fn fetch_all(&mut self) -> RowResult<Vec<Vec<Value>>> {
        (**self).fetch_all()
    }

    fn placeholder(&self) -> Placeholder {
        (**self).placeholder()
    }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    fn execute(&mut self, sql: &str, params: &[Value]) -> RowResult<()> {
        (**self).execute(sql, params)
    }

    fn fetch_all(&mut self) -> RowResult<Vec<Vec<Value>>> {
        (**self).fetch_all()
    }

    fn placeholder(&self) -> Placeholder {
        (**self).placeholder()
    }
}

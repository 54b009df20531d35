//! Composable fragments for DDL statements.
//!
//! A fragment renders to a string; an empty string means "absent" and is dropped by
//! [`join_non_empty`]. These are only used for identifiers and keywords in
//! CREATE TYPE / CREATE TABLE / CREATE INDEX text, never for parameter values.
//!
//! ```
//! use metarow::stmt::{Cond, ParenList, Prefixed, Quoted, join_non_empty};
//!
//! let sql = join_non_empty(
//!     " ",
//!     &[
//!         &"CREATE",
//!         &Cond::new("UNIQUE", false),
//!         &"INDEX",
//!         &Prefixed::new("ON", Some(Quoted::new("users"))),
//!         &Prefixed::<&str>::new("USING", None),
//!         &ParenList::new(&["email"]),
//!     ],
//! )
//! .unwrap();
//! assert_eq!(sql, r#"CREATE INDEX ON "users" (email)"#);
//! ```

use crate::error::{RowError, RowResult};

/// Something that renders to a SQL fragment.
pub trait Render {
    /// Render the fragment; an empty string marks it as absent.
    fn render(&self) -> RowResult<String>;
}

impl Render for str {
    fn render(&self) -> RowResult<String> {
        Ok(self.to_string())
    }
}

impl Render for &str {
    fn render(&self) -> RowResult<String> {
        Ok((*self).to_string())
    }
}

impl Render for String {
    fn render(&self) -> RowResult<String> {
        Ok(self.clone())
    }
}

/// Render every fragment, drop the empty ones and join the rest with `delim`.
pub fn join_non_empty(delim: &str, fragments: &[&dyn Render]) -> RowResult<String> {
    let mut out = String::new();
    for fragment in fragments {
        let rendered = fragment.render()?;
        if rendered.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str(delim);
        }
        out.push_str(&rendered);
    }
    Ok(out)
}

/// `(t1,t2,...)`
#[derive(Debug, Clone, Copy)]
pub struct ParenList<'a, T> {
    tokens: &'a [T],
}

impl<'a, T: AsRef<str>> ParenList<'a, T> {
    pub fn new(tokens: &'a [T]) -> Self {
        Self { tokens }
    }
}

impl<T: AsRef<str>> Render for ParenList<'_, T> {
    fn render(&self) -> RowResult<String> {
        let inner: Vec<&str> = self.tokens.iter().map(AsRef::as_ref).collect();
        Ok(format!("({})", inner.join(",")))
    }
}

/// A double-quoted identifier.
///
/// No escaping is attempted: text containing `"` is rejected with
/// [`RowError::UnquotableIdentifier`].
#[derive(Debug, Clone, Copy)]
pub struct Quoted<'a> {
    value: &'a str,
}

impl<'a> Quoted<'a> {
    pub fn new(value: &'a str) -> Self {
        Self { value }
    }
}

impl Render for Quoted<'_> {
    fn render(&self) -> RowResult<String> {
        if self.value.contains('"') {
            return Err(RowError::UnquotableIdentifier(self.value.to_string()));
        }
        Ok(format!("\"{}\"", self.value))
    }
}

/// `prefix value`, or nothing when the value is absent or renders empty.
#[derive(Debug, Clone, Copy)]
pub struct Prefixed<'a, T> {
    prefix: &'a str,
    value: Option<T>,
}

impl<'a, T: Render> Prefixed<'a, T> {
    pub fn new(prefix: &'a str, value: Option<T>) -> Self {
        Self { prefix, value }
    }
}

impl<T: Render> Render for Prefixed<'_, T> {
    fn render(&self) -> RowResult<String> {
        let Some(value) = &self.value else {
            return Ok(String::new());
        };
        let rendered = value.render()?;
        if rendered.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{} {}", self.prefix, rendered))
    }
}

/// `label` when `condition` holds, nothing otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Cond<'a> {
    label: &'a str,
    condition: bool,
}

impl<'a> Cond<'a> {
    pub fn new(label: &'a str, condition: bool) -> Self {
        Self { label, condition }
    }
}

impl Render for Cond<'_> {
    fn render(&self) -> RowResult<String> {
        Ok(if self.condition {
            self.label.to_string()
        } else {
            String::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_skips_empty_fragments() {
        let sql = join_non_empty(" ", &[&"a", &"", &Cond::new("b", false), &"c"]).unwrap();
        assert_eq!(sql, "a c");
    }

    #[test]
    fn paren_list_joins_with_commas() {
        assert_eq!(ParenList::new(&["a", "b"]).render().unwrap(), "(a,b)");
        assert_eq!(ParenList::<&str>::new(&[]).render().unwrap(), "()");
    }

    #[test]
    fn quoted_rejects_double_quote() {
        assert_eq!(Quoted::new("a_b_row").render().unwrap(), "\"a_b_row\"");
        let err = Quoted::new("a\"b").render().unwrap_err();
        assert!(matches!(err, RowError::UnquotableIdentifier(s) if s == "a\"b"));
    }

    #[test]
    fn prefixed_omits_absent_values() {
        assert_eq!(
            Prefixed::new("USING", Some("gist")).render().unwrap(),
            "USING gist"
        );
        assert_eq!(Prefixed::<&str>::new("USING", None).render().unwrap(), "");
        assert_eq!(Prefixed::new("WHERE", Some("")).render().unwrap(), "");
    }

    #[test]
    fn quoted_error_propagates_through_join() {
        let bad = Prefixed::new("ON", Some(Quoted::new("x\"y")));
        assert!(join_non_empty(" ", &[&"CREATE", &bad]).is_err());
    }
}

use crate::error::RowResult;
use crate::stmt::{Cond, ParenList, Prefixed, Quoted, join_non_empty};

/// Structured index declaration.
///
/// # Example
///
/// ```rust
/// use metarow::Index;
///
/// let idx = Index::on(["a", "b"]).using("gist");
/// assert_eq!(
///     idx.render("a_b_row").unwrap(),
///     r#"CREATE INDEX ON "a_b_row" USING gist (a,b)"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    fields: Vec<String>,
    method: Option<String>,
    predicate: Option<String>,
    unique: bool,
}

impl Index {
    /// Index over `fields`, in order.
    pub fn on<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            method: None,
            predicate: None,
            unique: false,
        }
    }

    /// Access method, e.g. `gist` or `brin`.
    pub fn using(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Partial index predicate, written verbatim after `WHERE`.
    pub fn filter(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// `CREATE [UNIQUE] INDEX ON "<table>" [USING <method>] (<fields>) [WHERE <predicate>]`
    pub fn render(&self, table: &str) -> RowResult<String> {
        join_non_empty(
            " ",
            &[
                &"CREATE",
                &Cond::new("UNIQUE", self.unique),
                &"INDEX",
                &Prefixed::new("ON", Some(Quoted::new(table))),
                &Prefixed::new("USING", self.method.as_deref()),
                &ParenList::new(self.fields.as_slice()),
                &Prefixed::new("WHERE", self.predicate.as_deref()),
            ],
        )
    }
}

/// An index entry of a schema: either a complete statement or an [`Index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexDecl {
    /// A pre-rendered statement, emitted as-is.
    Raw(String),
    Index(Index),
}

impl IndexDecl {
    pub fn render(&self, table: &str) -> RowResult<String> {
        match self {
            Self::Raw(stmt) => Ok(stmt.clone()),
            Self::Index(index) => index.render(table),
        }
    }
}

impl From<Index> for IndexDecl {
    fn from(index: Index) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for IndexDecl {
    fn from(stmt: &str) -> Self {
        Self::Raw(stmt.to_string())
    }
}

impl From<String> for IndexDecl {
    fn from(stmt: String) -> Self {
        Self::Raw(stmt)
    }
}

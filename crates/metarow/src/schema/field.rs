/// Scalar kinds with a fixed SQL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeKind {
    Int,
    Text,
    Float,
    Bool,
}

impl NativeKind {
    /// The SQL type used for columns of this kind.
    pub fn sql_type(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Text => "text",
            Self::Float => "float",
            Self::Bool => "boolean",
        }
    }
}

/// Type classification of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// A scalar with a fixed SQL type.
    Native(NativeKind),
    /// An array of scalars, rendered as `<type>[]`.
    Array(NativeKind),
    /// A SQL type passed through verbatim (e.g. `geometry(Point,4326)`).
    Raw(String),
    /// A fixed set of string labels, compiled to a generated enum type.
    Enum(Vec<String>),
}

impl From<NativeKind> for FieldType {
    fn from(kind: NativeKind) -> Self {
        Self::Native(kind)
    }
}

/// A named, typed column of a row schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    ty: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<FieldType>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, NativeKind::Int)
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, NativeKind::Text)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, NativeKind::Float)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, NativeKind::Bool)
    }

    pub fn array(name: impl Into<String>, of: NativeKind) -> Self {
        Self::new(name, FieldType::Array(of))
    }

    /// A column whose SQL type is written verbatim into CREATE TABLE.
    ///
    /// [`crate::Value`] has no counterpart for arbitrary server types, so with the
    /// `postgres` adapter only raw types that are text-like or one of the native kinds
    /// can be bound and decoded. Other types (`timestamptz`, `numeric`, ...) fail with
    /// a decode error under `select *`; select them with a cast instead.
    pub fn raw(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self::new(name, FieldType::Raw(sql_type.into()))
    }

    /// A column restricted to `labels`, backed by a generated `CREATE TYPE ... AS ENUM`.
    pub fn enumeration<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            FieldType::Enum(labels.into_iter().map(Into::into).collect()),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.ty
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.ty, FieldType::Enum(_))
    }
}

impl<S: Into<String>> From<(S, NativeKind)> for Field {
    fn from((name, kind): (S, NativeKind)) -> Self {
        Self::new(name, kind)
    }
}

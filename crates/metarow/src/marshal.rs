//! Turning cursor rows back into [`Row`] instances.

use crate::bindings::Bindings;
use crate::compile::{SelectEq, StatementBuilder, join, pkey};
use crate::cursor::Cursor;
use crate::error::{RowError, RowResult};
use crate::row::Row;
use crate::schema::SchemaRef;
use crate::value::Value;
use std::sync::Arc;

/// Build a row from a `select *` result tuple (columns in field declaration order).
pub fn marshal(schema: &SchemaRef, values: Vec<Value>) -> RowResult<Row> {
    Row::construct(schema, values, Vec::new())
}

/// Marshal every result tuple positionally.
pub fn iter_models<'a, I>(schema: &'a SchemaRef, rows: I) -> impl Iterator<Item = RowResult<Row>> + 'a
where
    I: IntoIterator<Item = Vec<Value>>,
    I::IntoIter: 'a,
{
    rows.into_iter().map(move |values| marshal(schema, values))
}

/// Run `query` on `cursor` and marshal each result row into a [`Row`].
///
/// The query must project `*`: rows are unpacked positionally, so an explicit field
/// list is rejected with [`RowError::Usage`].
pub fn select_models<C: Cursor + ?Sized>(cursor: &mut C, query: &SelectEq) -> RowResult<Vec<Row>> {
    if !query.is_wildcard() {
        return Err(RowError::usage(
            "select_models() unpacks rows positionally; don't pass an explicit field list",
        ));
    }
    let stmt = query.build_with(cursor.placeholder())?;
    cursor.run(&stmt)?;
    iter_models(query.schema(), cursor.fetch_all()?).collect()
}

/// Fetch by primary key. Returns zero or one rows.
pub fn get<C, I, V>(cursor: &mut C, schema: &SchemaRef, pkey_values: I) -> RowResult<Vec<Row>>
where
    C: Cursor + ?Sized,
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    select_models(cursor, &pkey(schema, pkey_values)?)
}

impl SelectEq {
    /// Run this query and marshal the results; see [`select_models`].
    pub fn fetch_models<C: Cursor + ?Sized>(&self, cursor: &mut C) -> RowResult<Vec<Row>> {
        select_models(cursor, self)
    }
}

/// Join `schemas` on their shared primary key and split each result row into one
/// [`Row`] per schema, in the given schema order.
///
/// With `do_query == false` the cursor is assumed to be primed already and only the
/// unpacking happens.
///
/// # Panics
///
/// When a result row's width differs from the sum of the schemas' field counts. That
/// means the schemas do not describe the tables, which is a programming error.
pub fn select_joined_models<C: Cursor + ?Sized>(
    cursor: &mut C,
    schemas: &[&SchemaRef],
    where_: impl Into<Bindings>,
    do_query: bool,
) -> RowResult<Vec<Vec<Row>>> {
    if do_query {
        let stmt = join(schemas, where_).build_with(cursor.placeholder())?;
        cursor.run(&stmt)?;
    }

    let mut offsets = Vec::with_capacity(schemas.len());
    let mut total = 0;
    for schema in schemas {
        offsets.push(total);
        total += schema.width();
    }

    let mut out = Vec::new();
    for values in cursor.fetch_all()? {
        assert_eq!(
            values.len(),
            total,
            "joined row width does not match the schemas' field counts"
        );
        let mut models = Vec::with_capacity(schemas.len());
        for (schema, &start) in schemas.iter().zip(&offsets) {
            let slice = values[start..start + schema.width()].to_vec();
            models.push(marshal(schema, slice)?);
        }
        out.push(models);
    }
    Ok(out)
}

/// Layout of a heterogeneous result row: which column goes to which schema's field.
///
/// # Example
///
/// ```rust
/// use metarow::{ColumnSpec, Field, Row, RowSchema, Value};
///
/// let ab = RowSchema::builder("ABRow").fields([Field::int("a"), Field::int("b")]).build()?;
/// let xy = RowSchema::builder("Row2").fields([Field::int("x"), Field::int("y")]).build()?;
///
/// let spec = ColumnSpec::new([Some((&ab, "a")), Some((&xy, "*")), None])?;
/// let rows = spec.read_row(&[Value::Int(1), Value::Int(2), Value::Int(3), Value::from("skip")])?;
/// assert_eq!(rows, [Row::from_named(&ab, [("a", 1)])?, Row::new(&xy, [2, 3])?]);
/// # Ok::<(), metarow::RowError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// One entry per result column; `None` means the column is skipped.
    columns: Vec<Option<(SchemaRef, String)>>,
    /// Distinct schemas in first-occurrence order, with their `(field, column)` pairs.
    groups: Vec<(SchemaRef, Vec<(String, usize)>)>,
}

impl ColumnSpec {
    /// Build from `(schema, field)` pairs; `"*"` expands to all fields of the schema
    /// in declaration order and `None` skips one column.
    ///
    /// Each field of a schema may be mapped once; a repeat (including one introduced
    /// by `"*"`) is a [`RowError::DuplicateField`].
    pub fn new<'a, I, S>(pairs: I) -> RowResult<Self>
    where
        I: IntoIterator<Item = Option<(&'a SchemaRef, S)>>,
        S: AsRef<str>,
    {
        let mut columns = Vec::new();
        for pair in pairs {
            let Some((schema, field)) = pair else {
                columns.push(None);
                continue;
            };
            match field.as_ref() {
                "*" => columns.extend(
                    schema
                        .field_names()
                        .map(|name| Some((Arc::clone(schema), name.to_string()))),
                ),
                name => {
                    schema.require_field(name)?;
                    columns.push(Some((Arc::clone(schema), name.to_string())));
                }
            }
        }

        let mut groups: Vec<(SchemaRef, Vec<(String, usize)>)> = Vec::new();
        for (i, column) in columns.iter().enumerate() {
            let Some((schema, field)) = column else {
                continue;
            };
            let entry = (field.clone(), i);
            match groups.iter_mut().find(|(s, _)| Arc::ptr_eq(s, schema)) {
                Some((_, fields)) => {
                    if fields.iter().any(|(f, _)| f == field) {
                        return Err(RowError::DuplicateField {
                            schema: schema.name().to_string(),
                            field: field.clone(),
                        });
                    }
                    fields.push(entry);
                }
                None => groups.push((Arc::clone(schema), vec![entry])),
            }
        }

        Ok(Self { columns, groups })
    }

    /// Number of result columns this spec consumes (including skipped ones).
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Split one result row into one [`Row`] per distinct schema (first-occurrence
    /// order), each built by name from its columns; other fields stay missing.
    pub fn read_row(&self, values: &[Value]) -> RowResult<Vec<Row>> {
        if values.len() < self.columns.len() {
            return Err(RowError::RowWidth {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        self.groups
            .iter()
            .map(|(schema, fields)| {
                Row::from_named(
                    schema,
                    fields
                        .iter()
                        .map(|(field, i)| (field.as_str(), values[*i].clone())),
                )
            })
            .collect()
    }

    /// Drain `cursor` and [`read_row`](Self::read_row) every result row.
    pub fn marshal_all<C: Cursor + ?Sized>(&self, cursor: &mut C) -> RowResult<Vec<Vec<Row>>> {
        cursor
            .fetch_all()?
            .iter()
            .map(|values| self.read_row(values))
            .collect()
    }
}

use crate::error::RowResult;
use crate::schema::{Field, FieldType, RowSchema, SchemaRegistry};
use crate::stmt::{ParenList, Prefixed, Quoted, Render, join_non_empty};

/// Quoted name of the enum type generated for `field`: `"<table>_<field>"`.
pub fn enum_type_name(schema: &RowSchema, field: &Field) -> RowResult<String> {
    Quoted::new(&format!("{}_{}", schema.table(), field.name())).render()
}

fn column_type(schema: &RowSchema, field: &Field) -> RowResult<String> {
    Ok(match field.field_type() {
        FieldType::Native(kind) => kind.sql_type().to_string(),
        FieldType::Array(kind) => format!("{}[]", kind.sql_type()),
        FieldType::Raw(sql_type) => sql_type.clone(),
        FieldType::Enum(_) => enum_type_name(schema, field)?,
    })
}

fn create_types(schema: &RowSchema) -> RowResult<Vec<String>> {
    schema
        .fields()
        .iter()
        .filter_map(|field| match field.field_type() {
            FieldType::Enum(labels) => Some((field, labels)),
            _ => None,
        })
        .map(|(field, labels)| {
            let literals: Vec<String> = labels.iter().map(|l| format!("'{l}'")).collect();
            join_non_empty(
                " ",
                &[
                    &"CREATE TYPE",
                    &enum_type_name(schema, field)?,
                    &"AS ENUM",
                    &ParenList::new(literals.as_slice()),
                ],
            )
        })
        .collect()
}

/// DDL statements that create `schema`'s table.
///
/// Order: one `CREATE TYPE ... AS ENUM` per enum field, then `CREATE TABLE`, then one
/// statement per index declaration. The output depends only on the schema.
pub fn create_table(schema: &RowSchema) -> RowResult<Vec<String>> {
    let mut columns = Vec::with_capacity(schema.width() + 1);
    for field in schema.fields() {
        columns.push(format!("{} {}", field.name(), column_type(schema, field)?));
    }
    if !schema.pkey().is_empty() {
        columns.push(format!("PRIMARY KEY {}", ParenList::new(schema.pkey()).render()?));
    }

    let head = Prefixed::new("CREATE TABLE", Some(Quoted::new(schema.table()))).render()?;

    let mut statements = create_types(schema)?;
    statements.push(format!("{head} ({})", columns.join(", ")));
    for index in schema.indexes() {
        statements.push(index.render(schema.table())?);
    }
    Ok(statements)
}

/// DDL for every registered schema, in registration order.
pub fn init_db(registry: &SchemaRegistry) -> RowResult<Vec<String>> {
    let mut statements = Vec::new();
    for schema in registry.iter() {
        statements.extend(create_table(schema)?);
    }
    tracing::debug!(
        target: "metarow.ddl",
        tables = registry.len(),
        statements = statements.len(),
        "compiled schema DDL"
    );
    Ok(statements)
}

//! Declare a couple of schemas, print their DDL and the statements compiled for them.
//!
//! Run with:
//!   cargo run --example declare_and_compile -p metarow
//!
//! When DATABASE_URL is set the statements are also executed against that database
//! (tables are dropped afterwards).

use metarow::{
    Field, Index, Placeholder, Row, RowResult, RowSchema, SchemaRegistry, StatementBuilder,
    Value, init_db, insert, join, update_eq,
};

fn main() -> RowResult<()> {
    let mut registry = SchemaRegistry::new();

    let users = RowSchema::builder("ExampleUser")
        .fields([
            Field::int("id"),
            Field::text("name"),
            Field::enumeration("plan", ["free", "pro"]),
        ])
        .pkey(["id"])
        .index(Index::on(["name"]).unique())
        .register(&mut registry)?;

    let stats = RowSchema::builder("ExampleUserStats")
        .fields([Field::int("id"), Field::int("logins")])
        .pkey(["id"])
        .register(&mut registry)?;

    println!("-- DDL");
    let ddl = init_db(&registry)?;
    for stmt in &ddl {
        println!("{stmt};");
    }

    let alice = Row::new(
        &users,
        vec![Value::from(1), Value::from("alice"), Value::from("pro")],
    )?;
    let alice_stats = Row::new(&stats, [1, 0])?;

    println!("\n-- statements");
    for stmt in [
        insert(&alice).build()?,
        update_eq(&stats, [("id", 1)], [("logins", 1)]).build_with(Placeholder::Dollar)?,
        join(&[&users, &stats], [("id", 1)]).build()?,
    ] {
        println!("{}  {:?}", stmt.sql, stmt.params);
    }

    dotenvy::dotenv().ok();
    match std::env::var("DATABASE_URL") {
        Ok(url) => execute(&url, &ddl, &[alice, alice_stats]),
        Err(_) => {
            println!("\nDATABASE_URL is not set; not executing");
            Ok(())
        }
    }
}

#[cfg(feature = "postgres")]
fn execute(url: &str, ddl: &[String], rows: &[Row]) -> RowResult<()> {
    use metarow::{Cursor, PgCursor, TracingCursor, get, select_joined_models};

    let mut cursor = TracingCursor::new(PgCursor::connect(url)?);
    for stmt in ddl {
        cursor.execute(stmt, &[])?;
    }
    for row in rows {
        let stmt = insert(row).build_with(cursor.placeholder())?;
        cursor.run(&stmt)?;
    }

    let users = rows[0].schema();
    let stats = rows[1].schema();

    println!("\n-- fetched");
    println!("{:?}", get(&mut cursor, users, [1])?);
    for pair in select_joined_models(&mut cursor, &[users, stats], [("id", 1)], true)? {
        println!("{} + {}", pair[0], pair[1]);
    }

    for table in [stats.table(), users.table()] {
        cursor.execute(&format!("DROP TABLE \"{table}\""), &[])?;
    }
    cursor.execute(&format!("DROP TYPE \"{}_plan\"", users.table()), &[])?;
    Ok(())
}

#[cfg(not(feature = "postgres"))]
fn execute(_url: &str, _ddl: &[String], _rows: &[Row]) -> RowResult<()> {
    println!("\nbuilt without the `postgres` feature; not executing");
    Ok(())
}

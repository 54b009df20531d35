//! Marshalling rows through a scripted in-memory cursor.

use metarow::{
    Bindings, ColumnSpec, Cursor, Field, Placeholder, RecordingCursor, Row, RowError, RowSchema,
    SchemaRef, Slot, StatementBuilder, TracingCursor, Value, get, insert, marshal,
    select_eq, select_joined_models, select_models,
};

fn ab_row() -> SchemaRef {
    RowSchema::builder("ABRow")
        .fields([Field::int("a"), Field::int("b")])
        .pkey(["a"])
        .build()
        .unwrap()
}

fn ac_row() -> SchemaRef {
    RowSchema::builder("ACRow")
        .fields([Field::int("a"), Field::int("c")])
        .pkey(["a"])
        .build()
        .unwrap()
}

fn row(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}

#[test]
fn select_models_marshals_each_row() {
    let ab = ab_row();
    let mut cursor = RecordingCursor::new().with_rows(vec![row(&[1, 2]), row(&[3, 4])]);

    let rows = select_models(&mut cursor, &select_eq(&ab, Bindings::new())).unwrap();
    assert_eq!(
        rows,
        vec![
            Row::new(&ab, [1, 2]).unwrap(),
            Row::new(&ab, [3, 4]).unwrap()
        ]
    );
    assert_eq!(cursor.executed()[0].sql, "select * from a_b_row");
}

#[test]
fn select_models_uses_cursor_placeholder() {
    let ab = ab_row();
    let mut cursor = RecordingCursor::new()
        .placeholder_style(Placeholder::Dollar)
        .with_rows(vec![row(&[1, 2])]);

    select_eq(&ab, [("a", 1)]).fetch_models(&mut cursor).unwrap();
    assert_eq!(cursor.executed()[0].sql, "select * from a_b_row where a=$1");
    assert_eq!(cursor.executed()[0].params, row(&[1]));
}

#[test]
fn select_models_rejects_explicit_fields() {
    let ab = ab_row();
    let mut cursor = RecordingCursor::new();
    let err = select_models(&mut cursor, &select_eq(&ab, Bindings::new()).fields(["a"]))
        .unwrap_err();
    assert!(err.is_usage());
    assert!(cursor.executed().is_empty());
}

#[test]
fn get_by_primary_key() {
    let ab = ab_row();
    let mut cursor = RecordingCursor::new()
        .with_rows(vec![row(&[7, 8])])
        .with_rows(vec![]);

    let found = get(&mut cursor, &ab, [7]).unwrap();
    assert_eq!(found, vec![Row::new(&ab, [7, 8]).unwrap()]);
    assert!(get(&mut cursor, &ab, [9]).unwrap().is_empty());

    let err = get(&mut cursor, &ab, Vec::<i64>::new()).unwrap_err();
    assert!(matches!(err, RowError::PkeyMismatch { .. }));
}

#[test]
fn marshal_rejects_wide_rows() {
    let ab = ab_row();
    let err = marshal(&ab, row(&[1, 2, 3])).unwrap_err();
    assert!(matches!(
        err,
        RowError::ArgCount {
            given: 3,
            declared: 2,
            ..
        }
    ));
}

#[test]
fn inserted_row_reads_back_equal() {
    let ab = ab_row();
    let original = Row::new(&ab, [5, 6]).unwrap();
    let stmt = insert(&original).returning(["a", "b"]).build().unwrap();

    // the cursor echoes the bound params as the returned row
    let mut cursor = RecordingCursor::new().with_rows(vec![stmt.params.clone()]);
    cursor.run(&stmt).unwrap();
    let back = marshal(&ab, cursor.fetch_all().unwrap().remove(0)).unwrap();
    assert_eq!(back, original);
}

#[test]
fn joined_models_split_per_schema() {
    let (ab, ac) = (ab_row(), ac_row());
    let mut cursor = RecordingCursor::new().with_rows(vec![row(&[1, 2, 1, 3])]);

    let rows = select_joined_models(&mut cursor, &[&ab, &ac], [("a", 1)], true).unwrap();
    assert_eq!(
        rows,
        vec![vec![
            Row::new(&ab, [1, 2]).unwrap(),
            Row::new(&ac, [1, 3]).unwrap()
        ]]
    );
    assert_eq!(
        cursor.executed()[0].sql,
        "select a_b_row.*,a_c_row.* from a_b_row join a_c_row using (a) where a=%s"
    );
}

#[test]
fn joined_models_from_primed_cursor() {
    let (ab, ac) = (ab_row(), ac_row());
    let mut cursor = RecordingCursor::new();
    cursor.set_pending(vec![row(&[4, 5, 4, 6])]);

    let rows = select_joined_models(&mut cursor, &[&ab, &ac], Bindings::new(), false).unwrap();
    assert_eq!(rows[0][1], Row::new(&ac, [4, 6]).unwrap());
    assert!(cursor.executed().is_empty());
}

#[test]
#[should_panic(expected = "joined row width")]
fn joined_models_panic_on_width_mismatch() {
    let (ab, ac) = (ab_row(), ac_row());
    let mut cursor = RecordingCursor::new();
    cursor.set_pending(vec![row(&[1, 2, 3])]);
    let _ = select_joined_models(&mut cursor, &[&ab, &ac], Bindings::new(), false);
}

#[test]
fn column_spec_groups_by_schema_and_skips() {
    let ab = ab_row();
    let row2 = RowSchema::builder("Row2")
        .fields([Field::int("x"), Field::int("y")])
        .build()
        .unwrap();

    let spec = ColumnSpec::new([Some((&ab, "a")), Some((&row2, "*")), None]).unwrap();
    assert_eq!(spec.width(), 4);

    let mut cursor = RecordingCursor::new();
    cursor.set_pending(vec![vec![
        Value::Int(1),
        Value::Int(2),
        Value::Int(3),
        Value::from("ignored"),
    ]]);
    let rows = spec.marshal_all(&mut cursor).unwrap();
    assert_eq!(rows.len(), 1);
    let [first, second] = rows[0].as_slice() else {
        panic!("expected two rows, got {:?}", rows[0]);
    };
    assert_eq!(first.get("a").unwrap(), &Slot::Set(Value::Int(1)));
    assert!(first.get("b").unwrap().is_missing());
    assert_eq!(second, &Row::new(&row2, [2, 3]).unwrap());

    let err = spec.read_row(&row(&[1, 2])).unwrap_err();
    assert!(matches!(err, RowError::RowWidth { expected: 4, actual: 2 }));
}

#[test]
fn column_spec_rejects_unknown_field() {
    let ab = ab_row();
    let err = ColumnSpec::new([Some((&ab, "zzz"))]).unwrap_err();
    assert!(err.is_unknown_field());
}

#[test]
fn cursor_errors_propagate_through_tracing_wrapper() {
    let ab = ab_row();
    let mut cursor = TracingCursor::new(RecordingCursor::new().with_error("relation missing"));
    let err = select_models(&mut cursor, &select_eq(&ab, Bindings::new())).unwrap_err();
    assert!(matches!(err, RowError::Cursor(ref m) if m == "relation missing"));
}

#[test]
fn column_spec_rejects_field_mapped_twice() {
    let ab = ab_row();
    let err = ColumnSpec::new([Some((&ab, "*")), Some((&ab, "a"))]).unwrap_err();
    assert!(matches!(
        err,
        RowError::DuplicateField { ref schema, ref field } if schema == "ABRow" && field == "a"
    ));

    let err = ColumnSpec::new([Some((&ab, "b")), None, Some((&ab, "b"))]).unwrap_err();
    assert!(matches!(err, RowError::DuplicateField { ref field, .. } if field == "b"));
}

#[test]
fn column_spec_interleaved_schemas_keep_first_occurrence_order() {
    let ab = ab_row();
    let row2 = RowSchema::builder("Row2")
        .fields([Field::int("x"), Field::int("y")])
        .build()
        .unwrap();

    let spec = ColumnSpec::new([Some((&ab, "a")), Some((&row2, "x")), Some((&ab, "b"))]).unwrap();
    let rows = spec.read_row(&row(&[1, 2, 3])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].schema().name(), "ABRow");
    assert_eq!(rows[0], Row::new(&ab, [1, 3]).unwrap());
    assert_eq!(rows[1].schema().name(), "Row2");
    assert_eq!(rows[1].value("x"), Some(&Value::Int(2)));
    assert!(rows[1].get("y").unwrap().is_missing());
}

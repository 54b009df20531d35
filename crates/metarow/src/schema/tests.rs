use super::*;

fn ab_builder() -> SchemaBuilder {
    RowSchema::builder("ABRow")
        .field(Field::int("a"))
        .field(Field::int("b"))
        .pkey(["a"])
}

#[test]
fn derives_table_name() {
    let schema = ab_builder().build().unwrap();
    assert_eq!(schema.name(), "ABRow");
    assert_eq!(schema.table(), "a_b_row");
    assert_eq!(schema.field_names().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(schema.pkey(), ["a".to_string()]);
}

#[test]
fn tuple_fields_are_accepted() {
    let schema = RowSchema::builder("Pair")
        .fields([("x", NativeKind::Int), ("y", NativeKind::Float)])
        .build()
        .unwrap();
    assert_eq!(
        schema.fields()[1].field_type(),
        &FieldType::Native(NativeKind::Float)
    );
    assert!(schema.pkey().is_empty());
}

#[test]
fn rejects_duplicate_field() {
    let err = RowSchema::builder("Dup")
        .field(Field::int("a"))
        .field(Field::text("a"))
        .build()
        .unwrap_err();
    assert!(matches!(err, RowError::DuplicateField { field, .. } if field == "a"));
}

#[test]
fn rejects_unknown_pkey_field() {
    let err = ab_builder().pkey(["c"]).build().unwrap_err();
    assert!(err.is_unknown_field());
}

#[test]
fn rejects_unknown_index_field() {
    let err = ab_builder().index(Index::on(["a", "z"])).build().unwrap_err();
    assert!(matches!(err, RowError::UnknownField { field, .. } if field == "z"));
}

#[test]
fn rejects_bad_identifiers() {
    assert!(matches!(
        RowSchema::builder("AB Row").build().unwrap_err(),
        RowError::InvalidIdentifier(_)
    ));
    assert!(matches!(
        RowSchema::builder("Ok").field(Field::int("no-dash")).build().unwrap_err(),
        RowError::InvalidIdentifier(_)
    ));
}

#[test]
fn rejects_bad_enum_labels() {
    let quoted = RowSchema::builder("Ticket")
        .field(Field::enumeration("state", ["open", "it's"]))
        .build();
    assert!(quoted.is_err());

    let repeated = RowSchema::builder("Ticket")
        .field(Field::enumeration("state", ["open", "open"]))
        .build();
    assert!(repeated.unwrap_err().is_usage());
}

#[test]
fn duplicate_table_keeps_first_registrant() {
    let mut registry = SchemaRegistry::new();
    let first = ab_builder()
        .origin("app::models")
        .register(&mut registry)
        .unwrap();

    let err = RowSchema::builder("ABRow")
        .register(&mut registry)
        .unwrap_err();
    match err {
        RowError::DuplicateTable { table, origin } => {
            assert_eq!(table, "a_b_row");
            assert_eq!(origin, "app::models");
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(registry.len(), 1);
    assert!(registry.holds(&first));
    assert_eq!(registry.get("a_b_row").unwrap().width(), 2);
}

#[test]
fn default_origin_is_call_site() {
    let schema = ab_builder().build().unwrap();
    assert!(schema.origin().contains("tests.rs"), "{}", schema.origin());
}

#[test]
fn registry_iterates_in_insertion_order() {
    let mut registry = SchemaRegistry::new();
    for name in ["Zeta", "Alpha", "Mid"] {
        RowSchema::builder(name)
            .field(Field::int("id"))
            .register(&mut registry)
            .unwrap();
    }
    let tables: Vec<_> = registry.iter().map(|s| s.table().to_string()).collect();
    assert_eq!(tables, ["zeta", "alpha", "mid"]);
}

#[test]
fn declare_schema_registers_when_asked() {
    let mut registry = SchemaRegistry::new();
    let schema = declare_schema(
        "ACRow",
        [Field::int("a"), Field::int("c")],
        ["a"],
        Vec::<IndexDecl>::new(),
        Some(&mut registry),
    )
    .unwrap();
    assert!(registry.holds(&schema));

    let unregistered = declare_schema(
        "Row2",
        [("x", NativeKind::Int)],
        Vec::<String>::new(),
        Vec::<IndexDecl>::new(),
        None,
    )
    .unwrap();
    assert_eq!(unregistered.table(), "row2");
}

#[test]
fn pkey_where_zips_in_order() {
    let schema = RowSchema::builder("Composite")
        .fields([Field::int("a"), Field::text("b"), Field::int("c")])
        .pkey(["c", "a"])
        .build()
        .unwrap();
    let w = schema.pkey_where([7, 1]).unwrap();
    assert_eq!(w.keys().collect::<Vec<_>>(), ["c", "a"]);
    assert_eq!(
        w.values().cloned().collect::<Vec<_>>(),
        [Value::Int(7), Value::Int(1)]
    );
}

#[test]
fn pkey_where_rejects_length_mismatch() {
    let schema = ab_builder().build().unwrap();
    let err = schema.pkey_where([1, 2]).unwrap_err();
    match err {
        RowError::PkeyMismatch { pkey, values } => {
            assert_eq!(pkey, ["a".to_string()]);
            assert_eq!(values, [Value::Int(1), Value::Int(2)]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

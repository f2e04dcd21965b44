use formshape::{FieldKind, FieldSpec, Range, Schema, schema::Structure};
use serde_json::{Map, Value, json};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn range_bounds_are_inclusive() {
    let range = Range::between(json!(1), json!(10));
    assert!(range.contains(&json!(1)));
    assert!(range.contains(&json!(5)));
    assert!(range.contains(&json!(10)));
    assert!(!range.contains(&json!(0)));
    assert!(!range.contains(&json!(11)));
    assert!(!range.contains(&json!("5")));
}

#[test]
fn open_ranges() {
    assert!(Range::at_least(json!(3)).contains(&json!(1000)));
    assert!(!Range::at_least(json!(3)).contains(&json!(2)));
    assert!(Range::at_most(json!("m")).contains(&json!("a")));
    assert!(!Range::at_most(json!("m")).contains(&json!("z")));
}

#[test]
fn field_spec_defaults() {
    let spec = FieldSpec::single("a.b");
    assert_eq!(spec.kind, FieldKind::Single);
    assert!(spec.allow_none);
    assert!(!spec.allow_coerce_failure);
    assert!(FieldSpec::list("tags").is_list());
}

#[test]
fn schema_collects_specs() {
    let schema: Schema = [("a".to_string(), FieldSpec::single("a"))]
        .into_iter()
        .collect();
    assert_eq!(schema.len(), 1);
    assert!(schema.contains("a"));
    assert!(schema.get("b").is_none());
}

fn journal_structure() -> Structure {
    Structure::new()
        .with_fields(&["id", "title"])
        .with_bools(&["in_doaj"])
        .with_lists(&["keywords", "links"])
        .with_objects(&["admin"])
        .with_list_entry("links", Structure::new().with_fields(&["url", "type"]))
        .with_object_entry("admin", Structure::new().with_fields(&["owner"]))
}

#[test]
fn structure_accepts_well_formed_record() {
    let record = object(json!({
        "id": "abc",
        "title": "Journal",
        "in_doaj": true,
        "keywords": ["a", 1],
        "links": [{"url": "http://x", "type": "home"}],
        "admin": {"owner": "me"}
    }));
    journal_structure().validate(&record).unwrap();
}

#[test]
fn structure_rejects_undeclared_keys() {
    let err = journal_structure()
        .validate(&object(json!({"surprise": 1})))
        .unwrap_err();
    assert!(err.is_validation_error());
}

#[test]
fn structure_rejects_mistyped_values() {
    let structure = journal_structure();
    for record in [
        json!({"in_doaj": "yes"}),
        json!({"title": {"nested": true}}),
        json!({"keywords": "not a list"}),
        json!({"keywords": [{"a": 1}]}),
        json!({"links": [{"url": "x", "extra": 1}]}),
        json!({"admin": {"owner": "me", "other": 1}}),
    ] {
        assert!(
            structure.validate(&object(record.clone())).is_err(),
            "accepted {record}"
        );
    }
}

use formshape::PathStore;
use serde_json::{Value, json};

#[test]
fn set_then_get_round_trips() {
    let mut store = PathStore::new();
    store.set_path("bibjson.journal.title", json!("Nature"));
    store.set_path("bibjson.year", json!(2016));

    assert_eq!(store.get_path("bibjson.journal.title"), Some(&json!("Nature")));
    assert_eq!(store.get_path("bibjson.year"), Some(&json!(2016)));
    assert_eq!(
        store.into_value(),
        json!({"bibjson": {"journal": {"title": "Nature"}, "year": 2016}})
    );
}

#[test]
fn set_returns_previous_leaf() {
    let mut store = PathStore::new();
    assert_eq!(store.set_path("a.b", json!(1)), None);
    assert_eq!(store.set_path("a.b", json!(2)), Some(json!(1)));
}

#[test]
fn missing_paths_read_as_absent_without_mutation() {
    let store = PathStore::from_value(json!({"a": {"b": 1}, "s": "text"})).unwrap();
    assert_eq!(store.get_path("a.c"), None);
    assert_eq!(store.get_path("x.y.z"), None);
    assert_eq!(store.get_path("s.inner"), None);
    assert_eq!(store.get_path_or("x.y", &json!("fallback")), &json!("fallback"));
    assert_eq!(store.as_map().len(), 2);
}

#[test]
fn non_mapping_intermediate_is_replaced() {
    let mut store = PathStore::from_value(json!({"a": "scalar"})).unwrap();
    store.set_path("a.b", json!(true));
    assert_eq!(store.get_path("a"), Some(&json!({"b": true})));
}

#[test]
fn non_object_record_is_rejected() {
    let err = PathStore::from_value(json!([1, 2])).unwrap_err();
    assert!(err.is_validation_error());
}

#[test]
fn keys_at_lists_immediate_children() {
    let store = PathStore::from_value(json!({"people": {"0": {}, "1": {}}, "n": 1})).unwrap();
    assert_eq!(store.keys_at("people"), vec!["0", "1"]);
    assert!(store.keys_at("n").is_empty());
    assert!(store.keys_at("missing").is_empty());
}

#[test]
fn delete_with_prune_removes_emptied_parents() {
    let mut store = PathStore::from_value(json!({"a": {"b": {"c": 1}}, "keep": 1})).unwrap();
    assert_eq!(store.delete_path("a.b.c", true), Some(json!(1)));
    assert_eq!(store.into_value(), json!({"keep": 1}));
}

#[test]
fn delete_without_prune_leaves_parents() {
    let mut store = PathStore::from_value(json!({"a": {"b": {"c": 1}}})).unwrap();
    store.delete_path("a.b.c", false);
    assert_eq!(store.get_path("a.b"), Some(&Value::Object(Default::default())));
    assert_eq!(store.delete_path("a.x", true), None);
}

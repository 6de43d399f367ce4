use dynjson_core::{Document, Handle, HandleMut, Map, Value};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};

fn sample() -> Document {
    Document::from_value(json!({
        "users": [
            {"name": "ada", "roles": ["admin", "dev"], "age": 36},
            {"name": "bob", "roles": [], "age": "41"}
        ],
        "meta": {"count": 2, "next": null}
    }))
}

// ============================================================================
// Reading
// ============================================================================

#[test]
fn keyed_and_indexed_access() {
    let doc = sample();
    let ada = doc.handle().get("users").at(0);
    assert_eq!(ada.get("name").as_string(None), "ada");
    assert_eq!(ada.get("roles").last().as_string(None), "dev");
    assert_eq!(ada.get("age").as_int(None), 36);
    assert_eq!(doc.handle().path("users.1.age").as_int(None), 41);
}

#[test]
fn present_null_vs_absent() {
    let doc = sample();
    let meta = doc.handle().get("meta");
    assert!(meta.exists("next"));
    assert!(!meta.get("next").is_absent());
    assert!(meta.get("next").value().is_some_and(Value::is_null));
    assert!(!meta.exists("prev"));
    assert!(meta.get("prev").is_absent());
}

#[test]
fn out_of_range_index_is_absent() {
    let doc = sample();
    let users = doc.handle().get("users");
    assert!(users.at(2).is_absent());
    assert!(users.at(usize::MAX).is_absent());
    assert!(users.at(1).get("roles").last().is_absent());
}

#[test]
fn absent_handle_chains_safely() {
    let deep = Handle::absent().get("a").at(3).last().path("x.y.0");
    assert!(deep.is_absent());
    assert!(!deep.is_array());
    assert!(!deep.is_object());
    assert!(!deep.exists("a"));
    assert_eq!(deep.len(), None);
    assert_eq!(deep.as_int(Some(1)), 0);
    assert!(deep.as_array(None).is_empty());
    assert_eq!(deep.cloned(), Value::Null);
}

#[test]
fn array_ops_on_object_are_absent() {
    let doc = sample();
    let meta = doc.handle().get("meta");
    assert!(meta.at(0).is_absent());
    assert!(meta.last().is_absent());
    let users = doc.handle().get("users");
    assert!(users.get("0").is_absent());
    assert!(!users.exists("0"));
}

#[test]
fn raw_container_extraction() {
    let doc = sample();
    let users = doc.handle().get("users").as_array(None);
    let names: Vec<String> = users
        .iter()
        .map(|user| user.handle().get("name").as_string(None))
        .collect();
    assert_eq!(names, ["ada", "bob"]);

    let meta = doc.handle().get("meta").as_object(None);
    let keys: Vec<&String> = meta.keys().collect();
    assert_eq!(keys, ["count", "next"]);

    let fallback = Map::from_iter([("k", 1)]);
    assert_eq!(
        doc.handle().get("users").as_object(Some(&fallback)),
        &fallback
    );
}

// ============================================================================
// Writing
// ============================================================================

#[test]
fn append_then_read_at_previous_length() {
    let mut doc = sample();
    let users = doc.object_get_mut("users").unwrap();
    let before = users.len().unwrap();
    users.array_append(json!({"name": "cy"}));
    assert_eq!(
        users.handle().at(before).get("name").as_string(None),
        "cy"
    );
}

#[test]
fn set_then_read_and_exists() {
    let mut doc = sample();
    let meta = doc.object_get_mut("meta").unwrap();
    meta.object_set("count", 3).object_set("source", "import");
    assert!(meta.exists("source"));
    assert_eq!(meta.object_get("count"), Some(&Value::Int(3)));
    assert_eq!(meta.handle().get("source").as_string(None), "import");
    let keys: Vec<&String> = meta.as_object(None).keys().collect();
    assert_eq!(keys, ["count", "next", "source"]);
}

#[test]
fn inserted_generic_containers_are_normalized() {
    let mut doc = Document::new_object();
    doc.object_set("from_json", json!({"inner": [1, {"deep": true}]}));

    let mut hashed = HashMap::new();
    hashed.insert("h", vec![1u8, 2]);
    doc.object_set("from_hashmap", hashed);

    let mut ordered = BTreeMap::new();
    ordered.insert("b".to_string(), Some(2.5));
    ordered.insert("a".to_string(), None);
    doc.object_set("from_btree", ordered);

    let root = doc.handle();
    assert!(root.path("from_json.inner.1.deep").as_bool(None));
    assert!(root.path("from_json.inner").is_array());
    assert_eq!(root.path("from_hashmap.h.1").as_int(None), 2);
    assert_eq!(root.path("from_btree").to_text(), r#"{"a":null,"b":2.5}"#);
}

#[test]
fn nested_builders_return_live_handles() {
    let mut doc = Document::new_object();
    {
        let mut root = doc.handle_mut();
        let mut matrix = root.object_new_array("matrix");
        matrix.array_new_array().array_append(1).array_append(2);
        matrix.array_new_array().array_append(3);
    }
    doc.handle_mut()
        .get_mut("matrix")
        .at_mut(1)
        .array_append(4);
    assert_eq!(doc.to_text(), r#"{"matrix":[[1,2],[3,4]]}"#);
}

#[test]
fn nested_object_in_array() {
    let mut doc = Document::new_array();
    doc.handle_mut()
        .array_new_object()
        .object_set("id", 1)
        .object_new_array("tags")
        .array_append("t");
    assert_eq!(doc.to_text(), r#"[{"id":1,"tags":["t"]}]"#);
}

#[test]
fn handle_mut_reads_through() {
    let mut doc = sample();
    let mut users = doc.handle_mut().into_get("users");
    assert!(users.handle().is_array());
    users.array_append("extra");
    assert_eq!(users.handle().last().as_string(None), "extra");
    assert!(users.value_mut().is_some());
}

#[test]
fn absent_mut_handle_ignores_everything() {
    let mut absent = HandleMut::absent();
    absent
        .array_append(1)
        .object_set("k", 2)
        .set("x");
    assert!(absent.array_new_array().is_absent());
    assert!(absent.object_new_object("o").is_absent());
    assert!(absent.handle().is_absent());
    assert!(absent.into_value_mut().is_none());
}

#[test]
fn overwrite_changes_kind() {
    let mut doc = sample();
    doc.object_set("users", "gone");
    assert!(!doc.handle().get("users").is_array());
    assert_eq!(doc.handle().get("users").as_string(None), "gone");
    assert!(doc.handle().get("users").at(0).is_absent());
}

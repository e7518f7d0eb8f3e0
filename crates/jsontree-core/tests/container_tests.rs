use jsontree_core::{parse, Array, JsonError, Object, Value, UNDEFINED};

// ============================================================================
// Object
// ============================================================================

#[test]
fn object_add_and_get() {
    let mut obj = Object::new();
    obj.add("a", 1).unwrap();
    obj.add("b", "two").unwrap();
    assert_eq!(obj.len(), 2);
    assert_eq!(obj.get("a"), Some(&Value::from(1)));
    assert_eq!(obj.get("b").and_then(Value::as_str), Some("two"));
    assert_eq!(obj.get("c"), None);
    assert!(obj.contains_key("a"));
    assert!(!obj.contains_key("A"));
}

#[test]
fn object_add_duplicate_fails_and_leaves_object_unchanged() {
    let mut obj = Object::from_pairs([("x", 1)]).unwrap();
    match obj.add("x", 2) {
        Err(JsonError::DuplicateKey(key)) => assert_eq!(key, "x"),
        other => panic!("expected DuplicateKey, got {other:?}"),
    }
    assert_eq!(obj.len(), 1);
    assert_eq!(obj.get("x"), Some(&Value::from(1)));
}

#[test]
fn object_set_replaces_in_place() {
    let mut obj = Object::from_pairs([("a", 1), ("b", 2), ("c", 3)]).unwrap();
    obj.set("b", 20).unwrap();
    obj.set("d", 4).unwrap();
    assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
    assert_eq!(obj.get("b"), Some(&Value::from(20)));
}

#[test]
fn object_remove() {
    let mut obj = Object::from_pairs([("a", 1), ("b", 2), ("c", 3)]).unwrap();
    assert!(obj.remove("b"));
    assert!(!obj.remove("b"));
    assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "c"]);
}

#[test]
fn object_clear() {
    let mut obj = Object::from_pairs([("a", 1)]).unwrap();
    obj.clear();
    assert!(obj.is_empty());
    obj.add("a", 2).unwrap();
    assert_eq!(obj.len(), 1);
}

#[test]
fn object_rejects_undefined() {
    let mut obj = Object::from_pairs([("a", 1)]).unwrap();
    assert!(matches!(
        obj.add("b", UNDEFINED.clone()),
        Err(JsonError::InvalidArgument(_))
    ));
    assert!(matches!(
        obj.set("a", Value::Undefined),
        Err(JsonError::InvalidArgument(_))
    ));
    assert_eq!(obj.get("a"), Some(&Value::from(1)));
    assert_eq!(obj.len(), 1);
}

#[test]
fn object_null_is_storable() {
    let mut obj = Object::new();
    obj.add("n", Value::Null).unwrap();
    obj.add("none", None::<i32>).unwrap();
    assert!(obj.get("n").is_some_and(Value::is_null));
    assert!(obj.get("none").is_some_and(Value::is_null));
}

#[test]
fn object_add_range_is_atomic() {
    let mut obj = Object::from_pairs([("a", 1)]).unwrap();
    assert!(obj.add_range([("b", 2), ("a", 3)]).is_err());
    assert_eq!(obj.len(), 1);

    assert!(obj.add_range([("b", 2), ("b", 3)]).is_err());
    assert_eq!(obj.len(), 1);

    assert!(obj
        .add_range([("b", Value::from(2)), ("c", UNDEFINED.clone())])
        .is_err());
    assert_eq!(obj.len(), 1);

    obj.add_range([("b", 2), ("c", 3)]).unwrap();
    assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
}

#[test]
fn object_iteration_follows_insertion_order() {
    let obj = Object::from_pairs([("z", 1), ("y", 2), ("x", 3)]).unwrap();
    let pairs: Vec<(&str, i32)> = obj
        .iter()
        .map(|(k, v)| (k, v.read_as::<i32>().unwrap()))
        .collect();
    assert_eq!(pairs, vec![("z", 1), ("y", 2), ("x", 3)]);
    assert_eq!(obj.iter().len(), 3);
    assert_eq!((&obj).into_iter().count(), 3);
    assert_eq!(obj.values().count(), 3);
}

#[test]
fn object_equality_ignores_order() {
    let a = Object::from_pairs([("a", 1), ("b", 2)]).unwrap();
    let b = Object::from_pairs([("b", 2), ("a", 1)]).unwrap();
    let c = Object::from_pairs([("a", 1), ("b", 3)]).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn nested_mutation_through_object_mut() {
    let mut doc = parse(r#"{"inner":{"list":[1]}}"#).unwrap();
    let inner = doc.as_object_mut().unwrap().object_mut("inner").unwrap();
    inner.array_mut("list").unwrap().add(2).unwrap();
    inner.set("flag", true).unwrap();
    assert_eq!(
        doc.to_text(&Default::default()).unwrap(),
        r#"{"inner":{"list":[1,2],"flag":true}}"#
    );
}

#[test]
fn object_mut_on_wrong_kind_is_none() {
    let mut obj = Object::from_pairs([("n", 1)]).unwrap();
    assert!(obj.object_mut("n").is_none());
    assert!(obj.array_mut("n").is_none());
    assert!(obj.object_mut("missing").is_none());
}

// ============================================================================
// Array
// ============================================================================

#[test]
fn array_add_insert_and_get() {
    let mut arr = Array::new();
    arr.add(1).unwrap();
    arr.add(3).unwrap();
    arr.insert(1, 2).unwrap();
    arr.insert(3, 4).unwrap();
    let items: Vec<i32> = arr.iter().map(|v| v.read_as().unwrap()).collect();
    assert_eq!(items, vec![1, 2, 3, 4]);
    assert_eq!(arr.get(0), Some(&Value::from(1)));
    assert_eq!(arr.get(4), None);
}

#[test]
fn array_insert_past_end_fails() {
    let mut arr = Array::from_values([1]).unwrap();
    assert!(matches!(
        arr.insert(2, 5),
        Err(JsonError::InvalidArgument(_))
    ));
    assert_eq!(arr.len(), 1);
}

#[test]
fn array_set_replaces_existing_element_only() {
    let mut arr = Array::from_values(["a", "b"]).unwrap();
    arr.set(1, "B").unwrap();
    assert_eq!(arr.get(1), Some(&Value::from("B")));
    assert!(matches!(
        arr.set(2, "c"),
        Err(JsonError::InvalidArgument(_))
    ));
    assert_eq!(arr.len(), 2);
}

#[test]
fn array_remove_at_returns_element() {
    let mut arr = Array::from_values([10, 20, 30]).unwrap();
    assert_eq!(arr.remove_at(1).unwrap(), Value::from(20));
    assert_eq!(arr.len(), 2);
    assert!(matches!(
        arr.remove_at(5),
        Err(JsonError::InvalidArgument(_))
    ));
}

#[test]
fn array_contains_and_index_of_use_value_equality() {
    let arr = parse(r#"[1, "x", {"a": 1}, 2.50]"#).unwrap();
    let arr = arr.as_array().unwrap();
    assert!(arr.contains(&Value::from("x")));
    assert_eq!(arr.index_of(&Value::from(2.5)), Some(3));
    assert_eq!(arr.index_of(&Value::from(1.0)), Some(0));
    assert_eq!(
        arr.index_of(&Value::object([("a", 1)]).unwrap()),
        Some(2)
    );
    assert_eq!(arr.index_of(&Value::Null), None);
}

#[test]
fn array_rejects_undefined() {
    let mut arr = Array::from_values([1]).unwrap();
    assert!(arr.add(UNDEFINED.clone()).is_err());
    assert!(arr.insert(0, UNDEFINED.clone()).is_err());
    assert!(arr.set(0, UNDEFINED.clone()).is_err());
    assert!(arr.add_range([Value::from(2), UNDEFINED.clone()]).is_err());
    assert_eq!(arr.len(), 1);
    assert!(Array::from_values([UNDEFINED.clone()]).is_err());
}

#[test]
fn array_clear() {
    let mut arr = Array::from_values([1, 2]).unwrap();
    arr.clear();
    assert!(arr.is_empty());
}

#[test]
fn array_equality_is_ordered() {
    let a = Array::from_values([1, 2]).unwrap();
    let b = Array::from_values([2, 1]).unwrap();
    assert_ne!(a, b);
    assert_eq!(a, Array::from_values([1.0, 2.0]).unwrap());
}

#[test]
fn nested_mutation_through_array_mut() {
    let mut doc = parse(r#"[[1],{"a":[]}]"#).unwrap();
    let arr = doc.as_array_mut().unwrap();
    arr.array_mut(0).unwrap().add(2).unwrap();
    let inner = arr.object_mut(1).unwrap().array_mut("a").unwrap();
    inner.add("x").unwrap();
    assert!(arr.object_mut(0).is_none());
    assert_eq!(
        doc.to_text(&Default::default()).unwrap(),
        r#"[[1,2],{"a":["x"]}]"#
    );
}

// ============================================================================
// Value-level helpers
// ============================================================================

#[test]
fn clone_is_deep() {
    let original = parse(r#"{"a":[1,2]}"#).unwrap();
    let mut copy = original.clone();
    copy.as_object_mut()
        .unwrap()
        .array_mut("a")
        .unwrap()
        .add(3)
        .unwrap();
    assert_eq!(original["a"].count(), 2);
    assert_eq!(copy["a"].count(), 3);
}

#[test]
fn count_keys_and_values() {
    let doc = parse(r#"{"a":1,"b":[true,false]}"#).unwrap();
    assert_eq!(doc.count(), 2);
    assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(doc["b"].values().count(), 2);
    assert!(doc.contains_key("b"));
    assert!(!doc["b"].contains_key("b"));
    assert_eq!(Value::from(1).count(), 0);
    assert_eq!(UNDEFINED.keys().count(), 0);
}

#[test]
fn value_constructors_reject_bad_input() {
    assert!(matches!(
        Value::object([("a", 1), ("a", 2)]),
        Err(JsonError::DuplicateKey(_))
    ));
    assert!(Value::array([Value::Null, UNDEFINED.clone()]).is_err());
}

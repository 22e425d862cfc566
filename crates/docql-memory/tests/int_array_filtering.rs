//! Whole-array filtering on an `IntArray` field.

use docql_core::{Catalog, EntityDefinition, TypeDescriptor};
use docql_memory::{DocumentMatcher, MemoryCollection};
use serde_json::{Value, json};

fn catalog() -> Catalog {
    let book = EntityDefinition::builder("Book")
        .table(true)
        .field("title", TypeDescriptor::STRING)
        .field("editions", TypeDescriptor::INT_ARRAY)
        .build();
    Catalog::from_entities([book]).unwrap()
}

fn books() -> MemoryCollection {
    let mut books = MemoryCollection::new("Book");
    books.insert(json!({"title": "Book 1", "editions": [1, 2, 3]}));
    books.insert(json!({"title": "Book 2", "editions": [1, 2, 3]}));
    books.insert(json!({"title": "Book 3", "editions": []}));
    books.insert(json!({"title": "Book 4", "editions": [1]}));
    books.insert(json!({"title": "Book 5", "editions": [9]}));
    books
}

fn titles(arguments: Value) -> Vec<String> {
    let arguments = arguments.as_object().cloned().unwrap();
    books()
        .query(&catalog(), &arguments)
        .unwrap()
        .into_iter()
        .map(|doc| doc["title"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_exact_match() {
    assert_eq!(titles(json!({"editions": [1, 2, 3]})), vec!["Book 1", "Book 2"]);
}

#[test]
fn test_exact_match_is_order_sensitive() {
    assert!(titles(json!({"editions": [3, 2, 1]})).is_empty());
}

#[test]
fn test_empty_array_match() {
    assert_eq!(titles(json!({"editions": []})), vec!["Book 3"]);
}

#[test]
fn test_not_equal() {
    assert_eq!(
        titles(json!({"editions_ne": [1, 2, 3]})),
        vec!["Book 3", "Book 4", "Book 5"]
    );
}

#[test]
fn test_contains_element() {
    assert_eq!(titles(json!({"editions_contains": 9})), vec!["Book 5"]);
}

#[test]
fn test_in_whole_arrays() {
    assert_eq!(
        titles(json!({"editions_in": [[], [1], [44]]})),
        vec!["Book 3", "Book 4"]
    );
}

#[test]
fn test_count_and_contains_any() {
    assert_eq!(titles(json!({"editions_count": 1})), vec!["Book 4", "Book 5"]);
    assert_eq!(
        titles(json!({"editions_containsAny": [3, 9]})),
        vec!["Book 1", "Book 2", "Book 5"]
    );
}

#[test]
fn test_or_over_array_filters() {
    assert_eq!(
        titles(json!({"OR": [{"editions": []}, {"editions_contains": 9}]})),
        vec!["Book 3", "Book 5"]
    );
}

#[test]
fn test_matcher_is_reusable() {
    let arguments = json!({"editions_emgte": 2}).as_object().cloned().unwrap();
    let matcher = DocumentMatcher::compile(&catalog(), "Book", &arguments).unwrap();
    let books = books();

    assert_eq!(books.count(&matcher), 3);
    assert_eq!(books.count(&matcher), books.find(&matcher).len());
}

/*
    distributor_tests.rs - NodeDistributor routing and membership behavior
*/

use serde_json::json;

use crate::core_crush::NodeDistributor;
use crate::core_plugin::{Storage, StoreError};
use crate::core_store::KeyValueStore;
use crate::plugins::{JsonSerializer, MemoryStorage};
use crate::test_utils::SharedStorage;

#[tokio::test]
async fn test_operations_fail_with_no_nodes() {
    let distributor = NodeDistributor::new();

    assert!(matches!(distributor.get("k").await.unwrap_err(), StoreError::NoAvailableNodes));
    assert!(matches!(
        distributor.set("k", vec![1]).await.unwrap_err(),
        StoreError::NoAvailableNodes
    ));
    assert!(matches!(distributor.delete("k").await.unwrap_err(), StoreError::NoAvailableNodes));
    assert!(matches!(distributor.select_node("k").unwrap_err(), StoreError::NoAvailableNodes));

    // Listing nothing is empty, not an error
    assert!(distributor.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_nodes_marks_available() {
    let mut distributor = NodeDistributor::new();
    distributor
        .add_nodes(vec![
            ("a".to_string(), Box::new(MemoryStorage::new()) as Box<dyn Storage>),
            ("b".to_string(), Box::new(MemoryStorage::new())),
        ])
        .await
        .unwrap();

    assert_eq!(distributor.available_nodes(), vec!["a", "b"]);
}

#[tokio::test]
async fn test_duplicate_node_ids_are_ignored() {
    let first = SharedStorage::new();
    let mut distributor = NodeDistributor::new();
    distributor
        .add_nodes(vec![("a".to_string(), Box::new(first.clone()) as Box<dyn Storage>)])
        .await
        .unwrap();

    distributor.set("k", b"v".to_vec()).await.unwrap();

    // Re-adding the same id must not overwrite the registered delegate
    distributor
        .add_nodes(vec![("a".to_string(), Box::new(MemoryStorage::new()) as Box<dyn Storage>)])
        .await
        .unwrap();

    assert_eq!(distributor.get("k").await.unwrap(), Some(b"v".to_vec()));
    assert_eq!(first.0.get("k").await.unwrap(), Some(b"v".to_vec()));
}

#[tokio::test]
async fn test_select_node_is_stable() {
    let distributor = NodeDistributor::with_nodes(vec![
        ("a".to_string(), Box::new(MemoryStorage::new()) as Box<dyn Storage>),
        ("b".to_string(), Box::new(MemoryStorage::new())),
        ("c".to_string(), Box::new(MemoryStorage::new())),
    ])
    .await
    .unwrap();

    let selected = distributor.select_node("user:1").unwrap().to_string();
    for _ in 0..25 {
        assert_eq!(distributor.select_node("user:1").unwrap(), selected);
    }
}

#[tokio::test]
async fn test_set_lands_only_on_selected_node() {
    let node_a = SharedStorage::new();
    let node_b = SharedStorage::new();
    let distributor = NodeDistributor::with_nodes(vec![
        ("A".to_string(), Box::new(node_a.clone()) as Box<dyn Storage>),
        ("B".to_string(), Box::new(node_b.clone())),
    ])
    .await
    .unwrap();

    distributor.set("user:1", b"profile".to_vec()).await.unwrap();

    let expected = distributor.select_node("user:1").unwrap();
    let (selected, other) =
        if expected == "A" { (&node_a, &node_b) } else { (&node_b, &node_a) };
    assert_eq!(selected.0.get("user:1").await.unwrap(), Some(b"profile".to_vec()));
    assert_eq!(other.0.get("user:1").await.unwrap(), None);
}

#[tokio::test]
async fn test_list_aggregates_across_nodes() {
    let distributor = NodeDistributor::with_nodes(vec![
        ("A".to_string(), Box::new(MemoryStorage::new()) as Box<dyn Storage>),
        ("B".to_string(), Box::new(MemoryStorage::new())),
        ("C".to_string(), Box::new(MemoryStorage::new())),
    ])
    .await
    .unwrap();

    distributor.set("first", vec![1]).await.unwrap();
    distributor.set("second", vec![2]).await.unwrap();

    // Exactly the keys written, regardless of which node stored them
    assert_eq!(distributor.list().await.unwrap(), vec!["first", "second"]);
}

#[tokio::test]
async fn test_delete_reflects_in_get_and_list() {
    let distributor = NodeDistributor::with_nodes(vec![
        ("A".to_string(), Box::new(MemoryStorage::new()) as Box<dyn Storage>),
        ("B".to_string(), Box::new(MemoryStorage::new())),
    ])
    .await
    .unwrap();

    distributor.set("k", vec![9]).await.unwrap();
    distributor.delete("k").await.unwrap();
    assert_eq!(distributor.get("k").await.unwrap(), None);
    assert!(distributor.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_removed_node_reroutes_silently() {
    let mut distributor = NodeDistributor::with_nodes(vec![
        ("a".to_string(), Box::new(MemoryStorage::new()) as Box<dyn Storage>),
        ("b".to_string(), Box::new(MemoryStorage::new())),
    ])
    .await
    .unwrap();

    distributor.set("k", b"v".to_vec()).await.unwrap();
    let owner = distributor.select_node("k").unwrap().to_string();

    distributor.remove_node(&owner);

    // The key now routes to the surviving node, which never saw it: the
    // documented silent-reroute gap, no "key not on this node" detection
    assert_eq!(distributor.available_nodes().len(), 1);
    assert_ne!(distributor.select_node("k").unwrap(), owner);
    assert_eq!(distributor.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn test_distributor_composes_under_store() {
    let distributor = NodeDistributor::with_nodes(vec![
        ("A".to_string(), Box::new(MemoryStorage::new()) as Box<dyn Storage>),
        ("B".to_string(), Box::new(MemoryStorage::new())),
        ("C".to_string(), Box::new(MemoryStorage::new())),
    ])
    .await
    .unwrap();

    let store =
        KeyValueStore::new(Box::new(distributor), Box::new(JsonSerializer::new()), vec![]);
    store.initialize().await.unwrap();

    for i in 0..10 {
        store.set(&format!("item:{}", i), &json!({"index": i})).await.unwrap();
    }
    let restored: Option<serde_json::Value> = store.get("item:7").await.unwrap();
    assert_eq!(restored, Some(json!({"index": 7})));
    assert_eq!(store.list().await.unwrap().len(), 10);
}

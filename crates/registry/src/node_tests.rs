// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jk_coord::MemoryStore;
use serde_json::json;
use std::sync::Arc;

fn registry(store: &MemoryStore) -> NodeRegistry {
    let client = CoordClient::new(Arc::new(store.session()));
    NodeRegistry::new(client, Paths::master_slave())
}

#[tokio::test]
async fn save_node_returns_handle_under_logical_parent() {
    let store = MemoryStore::new();
    let registry = registry(&store);
    let payload = json!({"host": "10.0.0.7", "capacity": 4});

    let path = registry.save_node(&payload).await.unwrap();

    let base = Paths::master_slave().node_base();
    assert_eq!(parent_of(&path), parent_of(&base));
    let entry = registry.get_node(&path).await.unwrap();
    assert_eq!(entry.payload, payload);
    assert_eq!(entry.path, path);
}

#[tokio::test]
async fn registrations_get_distinct_ordered_paths() {
    let store = MemoryStore::new();
    let registry = registry(&store);

    let first = registry.save_node(&json!({"host": "a"})).await.unwrap();
    let second = registry.save_node(&json!({"host": "b"})).await.unwrap();
    assert_ne!(first, second);
    assert!(first < second, "sequence suffix orders registrations");
}

#[tokio::test]
async fn get_all_nodes_sees_every_registration() {
    let store = MemoryStore::new();
    let registry = registry(&store);
    for i in 0..3 {
        registry.save_node(&json!({"idx": i})).await.unwrap();
    }

    assert_eq!(registry.get_all_nodes().await.unwrap().len(), 3);
}

#[tokio::test]
async fn delete_second_of_three_leaves_others_intact() {
    let store = MemoryStore::new();
    let registry = registry(&store);

    let _first = registry.save_node(&json!({"host": "a"})).await.unwrap();
    let second = registry.save_node(&json!({"host": "b"})).await.unwrap();
    let _third = registry.save_node(&json!({"host": "c"})).await.unwrap();

    registry.delete_node(&second).await.unwrap();

    let mut nodes = registry.get_all_nodes().await.unwrap();
    nodes.sort_by(|a, b| a.path.cmp(&b.path));
    let hosts: Vec<&str> =
        nodes.iter().filter_map(|n| n.payload.get("host")?.as_str()).collect();
    assert_eq!(hosts, vec!["a", "c"]);
}

#[tokio::test]
async fn deleted_node_is_gone() {
    let store = MemoryStore::new();
    let registry = registry(&store);
    let path = registry.save_node(&json!({})).await.unwrap();

    registry.delete_node(&path).await.unwrap();

    let err = registry.get_node(&path).await.unwrap_err();
    assert!(err.is_not_found());
    // Delete is not idempotent by design.
    let err = registry.delete_node(&path).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn update_node_refreshes_payload() {
    let store = MemoryStore::new();
    let registry = registry(&store);
    let path = registry.save_node(&json!({"capacity": 4})).await.unwrap();

    registry.update_node(&path, &json!({"capacity": 2})).await.unwrap();

    let entry = registry.get_node(&path).await.unwrap();
    assert_eq!(entry.payload, json!({"capacity": 2}));
}

#[tokio::test]
async fn update_absent_node_is_not_found() {
    let store = MemoryStore::new();
    let registry = registry(&store);
    registry.save_node(&json!({})).await.unwrap();

    let ghost = format!("{}-9999999999", Paths::master_slave().node_base());
    let err = registry.update_node(&ghost, &json!({})).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn session_expiry_removes_only_the_dead_workers_entries() {
    let store = MemoryStore::new();

    let crashing = Arc::new(store.session());
    let crashing_registry =
        NodeRegistry::new(CoordClient::new(crashing.clone()), Paths::master_slave());
    crashing_registry.save_node(&json!({"host": "doomed"})).await.unwrap();

    let survivor = registry(&store);
    let kept = survivor.save_node(&json!({"host": "kept"})).await.unwrap();
    assert_eq!(survivor.get_all_nodes().await.unwrap().len(), 2);

    crashing.expire();

    let nodes = survivor.get_all_nodes().await.unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].path, kept);
}

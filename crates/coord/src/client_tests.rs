// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::memory::MemoryStore;

fn client(store: &MemoryStore) -> CoordClient {
    CoordClient::new(Arc::new(store.session()))
}

#[tokio::test]
async fn create_builds_missing_parents() {
    let store = MemoryStore::new();
    let client = client(&store);

    let path = client.create("/deep/nested/leaf", b"v").await.unwrap();
    assert_eq!(path, "/deep/nested/leaf");
    assert!(client.check_exists("/deep").await.unwrap());
    assert!(client.check_exists("/deep/nested").await.unwrap());
}

#[tokio::test]
async fn create_existing_fails_already_exists() {
    let store = MemoryStore::new();
    let client = client(&store);
    client.create("/a/b", b"").await.unwrap();

    let err = client.create("/a/b", b"").await.unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists(_)));
}

#[tokio::test]
async fn get_children_returns_paths_with_data() {
    let store = MemoryStore::new();
    let client = client(&store);
    client.create("/reg/a", b"1").await.unwrap();
    client.create("/reg/b", b"2").await.unwrap();

    let mut children = client.get_children("/reg").await.unwrap();
    children.sort_by(|x, y| x.path.cmp(&y.path));
    assert_eq!(
        children,
        vec![
            ChildNode { path: "/reg/a".to_string(), data: b"1".to_vec() },
            ChildNode { path: "/reg/b".to_string(), data: b"2".to_vec() },
        ]
    );
}

#[tokio::test]
async fn get_children_of_absent_parent_fails() {
    let store = MemoryStore::new();
    let client = client(&store);

    let err = client.get_children("/nope").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn get_data_absent_is_not_found() {
    let store = MemoryStore::new();
    let client = client(&store);

    let err = client.get_data("/nope").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn set_then_get_round_trips() {
    let store = MemoryStore::new();
    let client = client(&store);
    client.create("/n", b"old").await.unwrap();

    client.set_data("/n", b"new").await.unwrap();
    assert_eq!(client.get_data("/n").await.unwrap().data, b"new");
}

#[tokio::test]
async fn sequential_creates_extend_base_name() {
    let store = MemoryStore::new();
    let client = client(&store);

    let first = client.create_ephemeral_sequential("/ms/nodes/child", b"n1").await.unwrap();
    let second = client.create_ephemeral_sequential("/ms/nodes/child", b"n2").await.unwrap();
    assert!(first.starts_with("/ms/nodes/child-"));
    assert_ne!(first, second);
    // Siblings live under the base name's parent, not under the base.
    let names = client.get_children("/ms/nodes").await.unwrap();
    assert_eq!(names.len(), 2);
}

#[tokio::test]
async fn delete_is_recursive_and_depth_first() {
    let store = MemoryStore::new();
    let client = client(&store);
    client.create("/jobs/etl/daily", b"").await.unwrap();
    client.create("/jobs/etl/hourly", b"").await.unwrap();
    client.create("/jobs/web/ping", b"").await.unwrap();

    client.delete("/jobs/etl").await.unwrap();

    assert!(!client.check_exists("/jobs/etl").await.unwrap());
    assert!(!client.check_exists("/jobs/etl/daily").await.unwrap());
    assert!(client.check_exists("/jobs/web/ping").await.unwrap());
}

#[tokio::test]
async fn delete_absent_is_not_found() {
    let store = MemoryStore::new();
    let client = client(&store);

    let err = client.delete("/nope").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn protected_create_tags_the_node_name() {
    let store = MemoryStore::new();
    let client = client(&store);

    let path = client.create_protected("/locks/init", b"").await.unwrap();
    assert!(path.starts_with("/locks/_p_"));
    assert!(path.ends_with("-init"));
    assert!(client.check_exists(&path).await.unwrap());
}

#[tokio::test]
async fn protected_create_survives_lost_ack_without_duplicating() {
    let store = MemoryStore::new();
    let session = store.session();
    session.create("/locks", b"", CreateMode::Persistent).await.unwrap();
    // Arm after the parent exists so the lost ack hits the target create.
    session.lose_next_create_ack();
    let client = CoordClient::new(Arc::new(session));

    let path = client.create_protected("/locks/init", b"x").await.unwrap();

    let siblings = client.get_children("/locks").await.unwrap();
    assert_eq!(siblings.len(), 1, "retry must recognize the committed create");
    assert_eq!(siblings[0].path, path);
    assert_eq!(siblings[0].data, b"x");
}

#[tokio::test]
async fn protected_sequential_create_survives_lost_ack() {
    let store = MemoryStore::new();
    let session = store.session();
    session.create("/queue", b"", CreateMode::Persistent).await.unwrap();
    session.lose_next_create_ack();
    let client = CoordClient::new(Arc::new(session));

    let path =
        client.create_persistent_sequential_protected("/queue/item", b"payload").await.unwrap();

    let siblings = client.get_children("/queue").await.unwrap();
    assert_eq!(siblings.len(), 1);
    assert_eq!(siblings[0].path, path);
    assert!(path.contains("-item-"), "sequential suffix on the tagged base name: {path}");
}

#[tokio::test]
async fn two_protected_calls_create_two_nodes() {
    // Protection dedupes retries of one logical create, not distinct calls.
    let store = MemoryStore::new();
    let client = client(&store);

    client.create_persistent_sequential_protected("/q/item", b"").await.unwrap();
    client.create_persistent_sequential_protected("/q/item", b"").await.unwrap();
    assert_eq!(client.get_children("/q").await.unwrap().len(), 2);
}

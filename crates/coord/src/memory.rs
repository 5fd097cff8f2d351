// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process coordination store with ZooKeeper-like semantics.
//!
//! One [`MemoryStore`] is the whole service: a path-keyed node table,
//! per-parent sequence counters, and session ownership of ephemerals.
//! Each [`MemorySession`] models one client session; `expire` models a
//! crash, removing exactly that session's ephemeral nodes. Readers see
//! no difference between expiry and explicit deletion.
//!
//! This backs every test in the workspace and doubles as the embedding
//! story for single-process deployments.

use crate::store::{CoordinationStore, CreateMode, StoreError};
use async_trait::async_trait;
use jk_core::parent_of;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct NodeRecord {
    data: Vec<u8>,
    mode: CreateMode,
    owner: Option<u64>,
}

#[derive(Debug)]
struct Tree {
    nodes: BTreeMap<String, NodeRecord>,
    /// Per-parent counters backing sequential creation.
    sequences: HashMap<String, u64>,
    next_session: u64,
}

impl Tree {
    fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            "/".to_string(),
            NodeRecord { data: Vec::new(), mode: CreateMode::Persistent, owner: None },
        );
        Self { nodes, sequences: HashMap::new(), next_session: 1 }
    }

    fn child_names(&self, path: &str) -> Vec<String> {
        self.nodes
            .keys()
            .filter(|k| k.as_str() != path && parent_of(k) == path)
            .filter_map(|k| k.rsplit('/').next().map(str::to_string))
            .collect()
    }

    fn has_children(&self, path: &str) -> bool {
        self.nodes.keys().any(|k| k.as_str() != path && parent_of(k) == path)
    }
}

/// Shared in-memory coordination service.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tree: Arc<Mutex<Tree>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { tree: Arc::new(Mutex::new(Tree::new())) }
    }

    /// Open a new session. Ephemeral nodes created through the returned
    /// handle live exactly as long as the session does.
    pub fn session(&self) -> MemorySession {
        let mut tree = self.tree.lock();
        let id = tree.next_session;
        tree.next_session += 1;
        MemorySession { tree: Arc::clone(&self.tree), id, lost_create_acks: AtomicU32::new(0) }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// One client session against a [`MemoryStore`].
#[derive(Debug)]
pub struct MemorySession {
    tree: Arc<Mutex<Tree>>,
    id: u64,
    /// Creates to commit server-side while reporting failure to the
    /// caller, modeling an ack lost to a network timeout.
    lost_create_acks: AtomicU32,
}

impl MemorySession {
    /// End the session the hard way: every ephemeral node it owns
    /// disappears, as if the process crashed past its session timeout.
    pub fn expire(&self) {
        let mut tree = self.tree.lock();
        tree.nodes.retain(|_, record| record.owner != Some(self.id));
    }

    /// Commit the next create server-side but report `Service` failure,
    /// reproducing the ambiguous-timeout hazard protected creation
    /// exists to absorb.
    #[cfg(any(test, feature = "test-support"))]
    pub fn lose_next_create_ack(&self) {
        self.lost_create_acks.fetch_add(1, Ordering::SeqCst);
    }

    fn take_lost_ack(&self) -> bool {
        self.lost_create_acks
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

fn validate(path: &str) -> Result<(), StoreError> {
    let well_formed = path == "/"
        || (path.starts_with('/')
            && !path.ends_with('/')
            && path.split('/').skip(1).all(|segment| !segment.is_empty()));
    if well_formed {
        Ok(())
    } else {
        Err(StoreError::Service(format!("invalid path: {path:?}")))
    }
}

#[async_trait]
impl CoordinationStore for MemorySession {
    async fn create(
        &self,
        path: &str,
        data: &[u8],
        mode: CreateMode,
    ) -> Result<String, StoreError> {
        validate(path)?;
        if path == "/" {
            return Err(StoreError::AlreadyExists("/".to_string()));
        }
        let parent = parent_of(path).to_string();
        let final_path = {
            let mut tree = self.tree.lock();
            let parent_record = tree
                .nodes
                .get(&parent)
                .ok_or_else(|| StoreError::NotFound(parent.clone()))?;
            if parent_record.mode.is_ephemeral() {
                return Err(StoreError::Service(format!(
                    "ephemeral node {parent} cannot have children"
                )));
            }
            let final_path = if mode.is_sequential() {
                loop {
                    let counter = tree.sequences.entry(parent.clone()).or_insert(0);
                    *counter += 1;
                    let candidate = format!("{path}-{:010}", *counter);
                    if !tree.nodes.contains_key(&candidate) {
                        break candidate;
                    }
                }
            } else {
                if tree.nodes.contains_key(path) {
                    return Err(StoreError::AlreadyExists(path.to_string()));
                }
                path.to_string()
            };
            let owner = mode.is_ephemeral().then_some(self.id);
            tree.nodes
                .insert(final_path.clone(), NodeRecord { data: data.to_vec(), mode, owner });
            final_path
        };
        if self.take_lost_ack() {
            return Err(StoreError::Service(format!(
                "lost create acknowledgment for {path}"
            )));
        }
        Ok(final_path)
    }

    async fn get_data(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let tree = self.tree.lock();
        tree.nodes
            .get(path)
            .map(|record| record.data.clone())
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    async fn set_data(&self, path: &str, data: &[u8]) -> Result<(), StoreError> {
        let mut tree = self.tree.lock();
        let record = tree
            .nodes
            .get_mut(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        record.data = data.to_vec();
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool, StoreError> {
        validate(path)?;
        Ok(self.tree.lock().nodes.contains_key(path))
    }

    async fn children(&self, path: &str) -> Result<Vec<String>, StoreError> {
        let tree = self.tree.lock();
        if !tree.nodes.contains_key(path) {
            return Err(StoreError::NotFound(path.to_string()));
        }
        Ok(tree.child_names(path))
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        let mut tree = self.tree.lock();
        if !tree.nodes.contains_key(path) {
            return Err(StoreError::NotFound(path.to_string()));
        }
        if tree.has_children(path) {
            return Err(StoreError::Service(format!("node {path} still has children")));
        }
        tree.nodes.remove(path);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;

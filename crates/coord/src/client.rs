// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster-facing client over a [`CoordinationStore`].
//!
//! Adds what the raw contract leaves out: children-with-data reads,
//! creation of missing parents, recursive delete, and retry-safe
//! "protected" creation. Everything stays a single logical attempt
//! except protected creation, whose internal retry exists precisely to
//! resolve the ambiguous-timeout duplication hazard.

use crate::store::{CoordinationStore, CreateMode, StoreError};
use jk_core::parent_of;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Bound on protected-create attempts before giving up.
const PROTECTED_ATTEMPTS: u32 = 3;

/// One child read: full path plus payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildNode {
    pub path: String,
    pub data: Vec<u8>,
}

/// Uniform CRUD surface shared by the registries.
///
/// Holds the store by `Arc` so registries compose it rather than
/// inherit from it; cloning shares the session.
#[derive(Clone)]
pub struct CoordClient {
    store: Arc<dyn CoordinationStore>,
}

impl CoordClient {
    pub fn new(store: Arc<dyn CoordinationStore>) -> Self {
        Self { store }
    }

    /// Immediate children of `path`, each with its payload.
    ///
    /// Listing and the per-child reads are separate round trips, so the
    /// result is not an atomic snapshot: concurrent mutation can leave a
    /// mix of before/after states. Accepted relaxation, not a bug.
    pub async fn get_children(&self, path: &str) -> Result<Vec<ChildNode>, StoreError> {
        let names = self.store.children(path).await?;
        let mut children = Vec::with_capacity(names.len());
        for name in names {
            children.push(self.get_data(&join(path, &name)).await?);
        }
        Ok(children)
    }

    /// One node's payload. `NotFound` when absent.
    pub async fn get_data(&self, path: &str) -> Result<ChildNode, StoreError> {
        let data = self.store.get_data(path).await?;
        Ok(ChildNode { path: path.to_string(), data })
    }

    /// Existence check; only service failures are errors.
    pub async fn check_exists(&self, path: &str) -> Result<bool, StoreError> {
        self.store.exists(path).await
    }

    /// Plain persistent create. Fails `AlreadyExists` on collision.
    pub async fn create(&self, path: &str, data: &[u8]) -> Result<String, StoreError> {
        self.create_with(path, data, CreateMode::Persistent, false).await
    }

    /// Persistent create, protected against retry duplication.
    pub async fn create_protected(&self, path: &str, data: &[u8]) -> Result<String, StoreError> {
        self.create_with(path, data, CreateMode::Persistent, true).await
    }

    /// Persistent-sequential create; returns the suffixed path.
    pub async fn create_persistent_sequential(
        &self,
        path: &str,
        data: &[u8],
    ) -> Result<String, StoreError> {
        self.create_with(path, data, CreateMode::PersistentSequential, false).await
    }

    /// Persistent-sequential create, protected against retry duplication.
    pub async fn create_persistent_sequential_protected(
        &self,
        path: &str,
        data: &[u8],
    ) -> Result<String, StoreError> {
        self.create_with(path, data, CreateMode::PersistentSequential, true).await
    }

    /// Ephemeral-sequential create; the returned path is the caller's
    /// handle to its own registration for the session's lifetime.
    pub async fn create_ephemeral_sequential(
        &self,
        path: &str,
        data: &[u8],
    ) -> Result<String, StoreError> {
        self.create_with(path, data, CreateMode::EphemeralSequential, false).await
    }

    /// Delete `path` and, depth-first, everything under it.
    ///
    /// `NotFound` when `path` is absent — not idempotent by design;
    /// callers wanting idempotence precede this with [`check_exists`].
    ///
    /// [`check_exists`]: CoordClient::check_exists
    pub async fn delete(&self, path: &str) -> Result<(), StoreError> {
        debug!(%path, "deleting subtree");
        self.delete_recursive(path).await
    }

    fn delete_recursive<'a>(
        &'a self,
        path: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<(), StoreError>> + Send + 'a>>
    {
        Box::pin(async move {
            for name in self.store.children(path).await? {
                self.delete_recursive(&join(path, &name)).await?;
            }
            self.store.delete(path).await
        })
    }

    /// Unconditional overwrite. `NotFound` when absent.
    pub async fn set_data(&self, path: &str, data: &[u8]) -> Result<(), StoreError> {
        debug!(%path, len = data.len(), "overwriting node data");
        self.store.set_data(path, data).await
    }

    async fn create_with(
        &self,
        path: &str,
        data: &[u8],
        mode: CreateMode,
        protected: bool,
    ) -> Result<String, StoreError> {
        self.ensure_parents(path).await?;
        debug!(%path, %mode, protected, "creating node");
        if !protected {
            return self.store.create(path, data, mode).await;
        }

        // Embed a one-shot tag in the node name so a retry after an
        // ambiguous ack can recognize its own committed create among the
        // siblings instead of creating a second node.
        let tag = Uuid::new_v4().to_string();
        let parent = parent_of(path);
        let base = path.rsplit('/').next().unwrap_or(path);
        let tagged_path = join(parent, &format!("_p_{tag}-{base}"));

        let mut last_failure = String::new();
        for attempt in 1..=PROTECTED_ATTEMPTS {
            match self.store.create(&tagged_path, data, mode).await {
                Ok(created) => return Ok(created),
                Err(StoreError::Service(reason)) => {
                    warn!(%path, attempt, %reason, "protected create ack lost; scanning siblings");
                    if let Some(found) = self.find_tagged(parent, &tag).await? {
                        return Ok(found);
                    }
                    last_failure = reason;
                }
                Err(other) => return Err(other),
            }
        }
        Err(StoreError::Service(format!(
            "protected create of {path} failed after {PROTECTED_ATTEMPTS} attempts: {last_failure}"
        )))
    }

    /// Look for a sibling carrying our protection tag: a prior create
    /// that committed server-side but whose ack never arrived.
    async fn find_tagged(&self, parent: &str, tag: &str) -> Result<Option<String>, StoreError> {
        let names = self.store.children(parent).await?;
        Ok(names.into_iter().find(|name| name.contains(tag)).map(|name| join(parent, &name)))
    }

    /// Create every missing ancestor of `path` as an empty persistent
    /// node. A concurrent sibling racing us to the same ancestor is fine.
    async fn ensure_parents(&self, path: &str) -> Result<(), StoreError> {
        let mut ancestor = String::new();
        let mut segments = path.split('/').filter(non_empty).peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                break;
            }
            ancestor.push('/');
            ancestor.push_str(segment);
            if self.store.exists(&ancestor).await? {
                continue;
            }
            match self.store.create(&ancestor, &[], CreateMode::Persistent).await {
                Ok(_) | Err(StoreError::AlreadyExists(_)) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}

fn non_empty(s: &&str) -> bool {
    !s.is_empty()
}

fn join(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ephemeral membership entries for live worker processes.

use crate::RegistryError;
use jk_coord::CoordClient;
use jk_core::{parent_of, NodeEntry, Paths};
use serde_json::Value;
use tracing::debug;

/// CRUD over worker registrations in one namespace.
///
/// Each entry is owned by the session that registered it; nothing here
/// enforces that convention. An entry disappearing by explicit
/// [`delete_node`] and by session expiry look identical to readers.
///
/// [`delete_node`]: NodeRegistry::delete_node
#[derive(Clone)]
pub struct NodeRegistry {
    client: CoordClient,
    paths: Paths,
}

impl NodeRegistry {
    pub fn new(client: CoordClient, paths: Paths) -> Self {
        Self { client, paths }
    }

    /// Every live worker in the namespace.
    ///
    /// Registrations are ephemeral-sequential siblings extending the
    /// `child` base name, so the listing parent is the base name's
    /// parent directory, not the base itself. Non-atomic composite view,
    /// like every children-with-data read.
    pub async fn get_all_nodes(&self) -> Result<Vec<NodeEntry>, RegistryError> {
        let base = self.paths.node_base();
        let children = self.client.get_children(parent_of(&base)).await?;
        children
            .iter()
            .map(|child| NodeEntry::from_child(&child.path, &child.data).map_err(Into::into))
            .collect()
    }

    /// Announce this process: ephemeral-sequential create under the node
    /// base. The returned path is the caller's durable handle to its own
    /// registration for the session's lifetime.
    pub async fn save_node(&self, payload: &Value) -> Result<String, RegistryError> {
        let bytes = NodeEntry::payload_bytes(payload)?;
        let path = self.client.create_ephemeral_sequential(&self.paths.node_base(), &bytes).await?;
        debug!(%path, "registered node");
        Ok(path)
    }

    /// Refresh a registration's payload. No existence pre-check: an
    /// absent path surfaces the store's `NotFound`.
    pub async fn update_node(&self, path: &str, payload: &Value) -> Result<(), RegistryError> {
        let bytes = NodeEntry::payload_bytes(payload)?;
        self.client.set_data(path, &bytes).await?;
        Ok(())
    }

    /// The entry at `path`. Fails `NotFound` when absent — unlike the
    /// job registry's by-identity lookup, absence of a registration the
    /// caller was handed means the owning session is gone, and callers
    /// must notice.
    pub async fn get_node(&self, path: &str) -> Result<NodeEntry, RegistryError> {
        let child = self.client.get_data(path).await?;
        Ok(NodeEntry::from_child(&child.path, &child.data)?)
    }

    /// Graceful deregistration. Not idempotent; callers wanting that
    /// check existence first.
    pub async fn delete_node(&self, path: &str) -> Result<(), RegistryError> {
        debug!(%path, "deregistering node");
        self.client.delete(path).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;

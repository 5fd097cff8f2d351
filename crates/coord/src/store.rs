// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw coordination-service contract.
//!
//! This is the narrow seam between the cluster and whatever provides the
//! hierarchical namespace: one node per operation, no parent creation,
//! no recursion, no retries. Adapters implement this; everything else in
//! the workspace goes through [`crate::CoordClient`].

use async_trait::async_trait;
use thiserror::Error;

/// Lifetime and naming semantics fixed at node creation.
///
/// Sequential modes append a service-assigned, monotonically increasing
/// suffix to the given base name. Ephemeral modes tie the node to the
/// creating session: when the session ends, the node goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateMode {
    Persistent,
    PersistentSequential,
    Ephemeral,
    EphemeralSequential,
}

impl CreateMode {
    pub fn is_sequential(self) -> bool {
        matches!(self, CreateMode::PersistentSequential | CreateMode::EphemeralSequential)
    }

    pub fn is_ephemeral(self) -> bool {
        matches!(self, CreateMode::Ephemeral | CreateMode::EphemeralSequential)
    }
}

jk_core::simple_display! {
    CreateMode {
        Persistent => "persistent",
        PersistentSequential => "persistent-sequential",
        Ephemeral => "ephemeral",
        EphemeralSequential => "ephemeral-sequential",
    }
}

/// Errors from coordination-store operations.
///
/// Every service-native failure is folded into these three kinds so upper
/// layers never branch on transport-specific error types. `Service`
/// covers transport, session loss, and service-internal failures alike,
/// carrying the underlying cause as text for diagnostics.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("path not found: {0}")]
    NotFound(String),
    #[error("path already exists: {0}")]
    AlreadyExists(String),
    #[error("coordination service failure: {0}")]
    Service(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// One logical session with the coordination service.
///
/// Ephemeral nodes created through a given implementation instance belong
/// to that instance's session. All operations are single attempts; any
/// retry policy lives with the caller.
#[async_trait]
pub trait CoordinationStore: Send + Sync + 'static {
    /// Create one node under an existing parent. Returns the final path,
    /// which differs from the requested one for sequential modes.
    ///
    /// Non-sequential creation of an existing path fails `AlreadyExists`;
    /// a missing parent fails `NotFound`.
    async fn create(&self, path: &str, data: &[u8], mode: CreateMode)
        -> Result<String, StoreError>;

    /// Read a node's payload. `NotFound` when absent.
    async fn get_data(&self, path: &str) -> Result<Vec<u8>, StoreError>;

    /// Overwrite a node's payload unconditionally. `NotFound` when absent.
    async fn set_data(&self, path: &str, data: &[u8]) -> Result<(), StoreError>;

    /// Existence check; absence is `Ok(false)`, never an error.
    async fn exists(&self, path: &str) -> Result<bool, StoreError>;

    /// Names of a node's immediate children. `NotFound` when the node
    /// itself is absent.
    async fn children(&self, path: &str) -> Result<Vec<String>, StoreError>;

    /// Delete one childless node. `NotFound` when absent; a node that
    /// still has children is a `Service` failure.
    async fn delete(&self, path: &str) -> Result<(), StoreError>;
}

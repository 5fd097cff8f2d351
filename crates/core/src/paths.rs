// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path taxonomy for the coordination namespace.
//!
//! Every path the cluster touches is derived here and nowhere else.
//! [`Paths`] is a plain value injected into whatever needs it; all
//! methods are deterministic, total, and do no I/O. The persisted layout
//! is a compatibility contract:
//!
//! ```text
//! /job-root/master-slave-node/selector
//! /job-root/master-slave-node/initLock
//! /job-root/master-slave-node/nodes/child-<seq>     (ephemeral-sequential)
//! /job-root/master-slave-node/jobs/{group}/{name}   (persistent)
//! ```

use serde::{Deserialize, Serialize};

/// Fixed namespace root shared by every deployment flavor.
pub const DEFAULT_ROOT: &str = "/job-root";

/// Namespace layout for one deployment flavor (master-slave or standby).
///
/// The two flavors share a shape and differ only in their root, so the
/// root is the only state. Clone is cheap; there is no global instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paths {
    root: String,
}

impl Paths {
    /// Namespace used by the master-slave cluster mode.
    pub fn master_slave() -> Self {
        Self { root: format!("{DEFAULT_ROOT}/master-slave-node") }
    }

    /// Namespace used by the standby cluster mode.
    pub fn standby() -> Self {
        Self { root: format!("{DEFAULT_ROOT}/standby-node") }
    }

    /// Namespace under an arbitrary root (tests, multi-tenant embeddings).
    pub fn with_root(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// Root of this namespace; every other path lives beneath it.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Contention point for the leader-election recipe.
    pub fn selector(&self) -> String {
        format!("{}/selector", self.root)
    }

    /// Mutual-exclusion point for one-time bootstrap initialization.
    pub fn init_lock(&self) -> String {
        format!("{}/initLock", self.root)
    }

    /// Base name for worker registrations.
    ///
    /// Live workers are ephemeral-sequential children extending this base
    /// name with a service-assigned suffix, so the actual siblings live
    /// under [`parent_of`]`(node_base())`, not under the base itself.
    pub fn node_base(&self) -> String {
        format!("{}/nodes/child", self.root)
    }

    /// Parent of every job group directory.
    pub fn jobs(&self) -> String {
        format!("{}/jobs", self.root)
    }

    /// Path of one job, derived from its human-assigned identity.
    ///
    /// Injective over distinct `(group, name)` pairs as long as neither
    /// component contains a slash.
    pub fn job(&self, group: &str, name: &str) -> String {
        format!("{}/jobs/{group}/{name}", self.root)
    }
}

/// Strip the last segment of a slash-delimited path.
///
/// `"/"` is its own parent; a path without any slash has no parent and is
/// returned unchanged.
pub fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => path,
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;

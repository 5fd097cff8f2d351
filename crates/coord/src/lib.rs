// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jk-coord: uniform CRUD surface over a hierarchical coordination service.
//!
//! [`CoordinationStore`] is the raw service contract (one node, one
//! operation); [`MemoryStore`] implements it in-process with
//! ZooKeeper-like semantics; [`CoordClient`] layers the cluster-facing
//! conveniences on top: children-with-data reads, parent-creating
//! creates, retry-safe protected creation, recursive delete.

pub mod client;
pub mod memory;
pub mod store;

pub use client::{ChildNode, CoordClient};
pub use memory::{MemorySession, MemoryStore};
pub use store::{CoordinationStore, CreateMode, StoreError};

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jk-registry: job and node registries over the coordination client.
//!
//! [`JobRegistry`] owns the versioned job documents under
//! `{namespace}/jobs/{group}/{name}`; [`NodeRegistry`] owns the
//! ephemeral membership entries under `{namespace}/nodes`. Both compose
//! a [`jk_coord::CoordClient`] and a [`jk_core::Paths`] value; neither
//! retries, recovers, or interprets payloads.

pub mod job;
pub mod node;

pub use job::JobRegistry;
pub use node::NodeRegistry;

use jk_coord::StoreError;
use jk_core::CodecError;
use thiserror::Error;

/// Errors surfaced by registry operations.
///
/// Coordination failures pass through unchanged (`NotFound`,
/// `AlreadyExists`, `Service`); decode failures of stored records get
/// their own kind and are never retried.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Serialization(#[from] CodecError),
}

impl RegistryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::Store(err) if err.is_not_found())
    }
}

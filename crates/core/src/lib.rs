// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jk-core: data model and path taxonomy for the jobkeeper coordination layer.
//!
//! Everything here is pure: path construction, the versioned job record,
//! the membership entry, and their JSON codecs. Talking to the
//! coordination service lives in `jk-coord`; the registries built on top
//! live in `jk-registry`.

pub mod macros;

pub mod job;
pub mod node;
pub mod paths;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use job::{JobData, JobDocument};
pub use node::NodeEntry;
pub use paths::{parent_of, Paths};

use thiserror::Error;

/// Failure decoding or encoding the JSON records stored in coordination
/// nodes. Surfaced by the registries as their `Serialization` error kind.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid record at {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("path {0} does not name a job (expected .../jobs/{{group}}/{{name}})")]
    MalformedJobPath(String),
}

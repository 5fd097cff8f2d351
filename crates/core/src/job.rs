// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Versioned job record and its on-wire form.
//!
//! A job is identified by a human-assigned `(group, name)` pair; its path
//! is derived from that identity by [`crate::Paths::job`]. The bytes
//! stored at the path are the JSON encoding of [`JobData`]: a version
//! counter plus an opaque payload this layer never interprets (cron
//! expression, execution target, parameters — the scheduler's business).

use crate::paths::parent_of;
use crate::CodecError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The mutable part of a job: version counter plus opaque payload.
///
/// This is exactly what is serialized into the coordination node. The
/// registry increments `version` on every save or update; consumers use
/// it for optimistic staleness detection. Nothing here enforces
/// compare-and-swap — racing writers can overwrite each other's bump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobData {
    #[serde(default)]
    pub version: u64,
    pub payload: Value,
}

impl JobData {
    /// A not-yet-stored record; the first save brings it to version 1.
    pub fn new(payload: Value) -> Self {
        Self { version: 0, payload }
    }

    /// Advance the version counter ahead of a write.
    pub fn increment_version(&mut self) {
        self.version += 1;
    }

    /// Encode to the stored JSON form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(self).map_err(CodecError::Encode)
    }

    /// Decode the stored JSON form read from `path`.
    pub fn from_bytes(path: &str, bytes: &[u8]) -> Result<Self, CodecError> {
        serde_json::from_slice(bytes)
            .map_err(|source| CodecError::Decode { path: path.to_string(), source })
    }
}

/// Transient projection of one stored job node.
///
/// The path is the source of truth; this struct is what a read returns
/// and what a write is about to publish. Group and name are recovered
/// from the last two path segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDocument {
    pub path: String,
    pub group: String,
    pub name: String,
    pub data: JobData,
}

impl JobDocument {
    /// Reconstruct a document from a child read `(path, bytes)`.
    pub fn from_child(path: &str, bytes: &[u8]) -> Result<Self, CodecError> {
        let (group, name) = split_identity(path)
            .ok_or_else(|| CodecError::MalformedJobPath(path.to_string()))?;
        Ok(Self {
            path: path.to_string(),
            group: group.to_string(),
            name: name.to_string(),
            data: JobData::from_bytes(path, bytes)?,
        })
    }

    pub fn version(&self) -> u64 {
        self.data.version
    }

    pub fn payload(&self) -> &Value {
        &self.data.payload
    }
}

/// Last two segments of a job path, as `(group, name)`.
fn split_identity(path: &str) -> Option<(&str, &str)> {
    let group_dir = parent_of(path);
    let name = path.strip_prefix(group_dir)?.strip_prefix('/')?;
    let group = group_dir.rsplit('/').next()?;
    if group.is_empty() || name.is_empty() {
        return None;
    }
    Some((group, name))
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;

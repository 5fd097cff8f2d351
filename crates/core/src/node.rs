// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Membership entry for one live worker process.

use crate::CodecError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One live worker, as registered in the coordination service.
///
/// The path is the ephemeral-sequential child assigned at registration;
/// its suffix totally orders currently-live siblings. The payload (host,
/// capacity, capabilities) is opaque at this layer. An entry disappears
/// either by explicit deregistration or by session expiry — readers
/// cannot tell the two apart and must not try.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub path: String,
    pub payload: Value,
}

impl NodeEntry {
    /// Reconstruct an entry from a child read `(path, bytes)`.
    pub fn from_child(path: &str, bytes: &[u8]) -> Result<Self, CodecError> {
        let payload = serde_json::from_slice(bytes)
            .map_err(|source| CodecError::Decode { path: path.to_string(), source })?;
        Ok(Self { path: path.to_string(), payload })
    }

    /// Encode a payload to the stored JSON form.
    pub fn payload_bytes(payload: &Value) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(payload).map_err(CodecError::Encode)
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for path and identity types.
pub mod strategies {
    use proptest::prelude::*;

    /// Human-assigned group/name identifiers: lowercase ASCII, digits,
    /// dashes. Never empty, never containing a slash.
    pub fn arb_identifier() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,15}"
    }

    /// Arbitrary JSON-ish job payloads (flat string maps are enough to
    /// exercise the codecs).
    pub fn arb_payload() -> impl Strategy<Value = serde_json::Value> {
        proptest::collection::hash_map("[a-z]{1,8}", "[a-zA-Z0-9 ]{0,16}", 0..4).prop_map(|m| {
            serde_json::Value::Object(
                m.into_iter().map(|(k, v)| (k, serde_json::Value::String(v))).collect(),
            )
        })
    }
}

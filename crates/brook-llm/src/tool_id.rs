//! # Tool-ID Resolution
//!
//! Caller-registered tool IDs may be namespaced (`weather/current`), but chat
//! APIs restrict function names, so IDs are sanitized before being sent and
//! the stream echoes back the sanitized form. This module builds the reverse
//! map and resolves wire names back to original IDs, refusing up front any
//! tool set where two IDs collapse to the same sanitized name.

use std::collections::HashMap;

use brook_core::tools::Tool;
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, ProviderResult};

/// Strip the characters chat APIs reject from a tool ID.
#[must_use]
pub fn sanitize_tool_id(id: &str) -> String {
    id.replace('/', "")
}

/// Reverse map from sanitized wire names to original tool IDs.
#[derive(Clone, Debug, Default)]
pub struct ToolIdMap {
    by_sanitized: HashMap<String, String>,
}

impl ToolIdMap {
    /// Build the map for a tool set.
    ///
    /// Fails with [`ProviderError::ToolIdCollision`] if two IDs sanitize to
    /// the same name, so ambiguity is rejected before any request is sent.
    pub fn from_tools(tools: &[Tool]) -> ProviderResult<Self> {
        let mut by_sanitized = HashMap::with_capacity(tools.len());
        for tool in tools {
            let sanitized = sanitize_tool_id(&tool.id);
            if let Some(existing) = by_sanitized.insert(sanitized.clone(), tool.id.clone()) {
                return Err(ProviderError::ToolIdCollision {
                    sanitized,
                    first: existing,
                    second: tool.id.clone(),
                });
            }
        }
        Ok(Self { by_sanitized })
    }

    /// Resolve a sanitized wire name back to the original tool ID.
    #[must_use]
    pub fn resolve(&self, sanitized: &str) -> Option<&str> {
        self.by_sanitized.get(sanitized).map(String::as_str)
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_sanitized.len()
    }

    /// Returns `true` if no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_sanitized.is_empty()
    }
}

/// A complete tool call reconstructed from a finished stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedToolCall {
    /// Original tool ID as the caller registered it.
    pub tool_id: String,
    /// Provider-assigned call ID, when the stream carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
    /// Parsed argument payload.
    pub arguments: serde_json::Value,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Tool definition types.
//!
//! Defines the schema for tools the caller registers with a provider. Tool
//! IDs may contain characters some chat APIs reject (e.g. `/` in namespaced
//! IDs like `weather/current`); providers sanitize on the way out and map
//! back on the way in.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────────────────────────────────────────────────────────────
// Tool schema
// ─────────────────────────────────────────────────────────────────────────────

/// JSON Schema-compatible parameter definition for a tool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolParameterSchema {
    /// Top-level JSON Schema type.
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Property definitions (when type is `object`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Map<String, Value>>,
    /// Required property names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Description of the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Catch-all for additional JSON Schema properties.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ToolParameterSchema {
    /// Create an object schema with the given properties and required names.
    #[must_use]
    pub fn object(
        properties: serde_json::Map<String, Value>,
        required: Vec<String>,
    ) -> Self {
        Self {
            schema_type: "object".into(),
            properties: Some(properties),
            required: if required.is_empty() {
                None
            } else {
                Some(required)
            },
            description: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Create an empty object schema (a tool that takes no arguments).
    #[must_use]
    pub fn empty_object() -> Self {
        Self::object(serde_json::Map::new(), Vec::new())
    }
}

/// A tool definition that can be sent to a provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool ID (unique identifier, may be namespaced with `/`).
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the tool's parameters.
    pub parameters: ToolParameterSchema,
}

impl Tool {
    /// Create a new tool definition.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        parameters: ToolParameterSchema,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            parameters,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

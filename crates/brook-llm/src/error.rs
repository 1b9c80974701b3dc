//! # Provider Errors
//!
//! Error taxonomy for streaming completion requests. A stream either runs to
//! completion or fails with exactly one of these; there is no retry logic at
//! this layer, so nothing here carries retry hints.

/// Result type alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur during provider operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request or mid-stream transport read failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider returned a non-success HTTP status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
        /// Provider-specific error code.
        code: Option<String>,
    },

    /// The stream named a tool that does not map back to any registered tool.
    #[error("unknown tool reference: {name}")]
    UnknownToolReference {
        /// Sanitized tool name as it appeared on the wire.
        name: String,
    },

    /// Accumulated tool-call arguments were not valid JSON.
    #[error("malformed arguments for tool {name}: {raw:?}")]
    MalformedToolArguments {
        /// Sanitized tool name as it appeared on the wire.
        name: String,
        /// The concatenated argument text that failed to parse.
        raw: String,
    },

    /// Two registered tool IDs collapse to the same sanitized name.
    #[error("tool ID collision: {first:?} and {second:?} both sanitize to {sanitized:?}")]
    ToolIdCollision {
        /// The shared sanitized name.
        sanitized: String,
        /// First colliding tool ID.
        first: String,
        /// Second colliding tool ID.
        second: String,
    },

    /// A conversation message cannot be expressed in the provider's wire format.
    #[error("invalid message: {message}")]
    InvalidMessage {
        /// Error description.
        message: String,
    },

    /// Stream was cancelled by the caller.
    #[error("stream cancelled")]
    Cancelled,

    /// Provider-specific error.
    #[error("{message}")]
    Other {
        /// Error description.
        message: String,
    },
}

impl ProviderError {
    /// Error category string for logging.
    pub fn category(&self) -> &str {
        match self {
            Self::Http(_) => "network",
            Self::Json(_) => "parse",
            Self::Api { .. } => "api",
            Self::UnknownToolReference { .. }
            | Self::MalformedToolArguments { .. }
            | Self::ToolIdCollision { .. } => "tool",
            Self::InvalidMessage { .. } => "invalid_message",
            Self::Cancelled => "cancelled",
            Self::Other { .. } => "unknown",
        }
    }

    /// Returns `true` if this error is the cancellation signal.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = ProviderError::Api {
            status: 401,
            message: "Invalid API key".into(),
            code: Some("invalid_api_key".into()),
        };
        assert_eq!(err.to_string(), "API error (401): Invalid API key");
        assert_eq!(err.category(), "api");
    }

    #[test]
    fn unknown_tool_reference_display() {
        let err = ProviderError::UnknownToolReference {
            name: "getweather".into(),
        };
        assert_eq!(err.to_string(), "unknown tool reference: getweather");
        assert_eq!(err.category(), "tool");
    }

    #[test]
    fn collision_display_names_both_ids() {
        let err = ProviderError::ToolIdCollision {
            sanitized: "ab".into(),
            first: "a/b".into(),
            second: "ab".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("a/b"));
        assert!(msg.contains("\"ab\""));
    }

    #[test]
    fn cancelled_category() {
        let err = ProviderError::Cancelled;
        assert!(err.is_cancelled());
        assert_eq!(err.category(), "cancelled");
    }

    #[test]
    fn json_error_category() {
        let err: ProviderError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert_eq!(err.category(), "parse");
        assert!(!err.is_cancelled());
    }
}

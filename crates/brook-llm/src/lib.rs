//! # brook-llm
//!
//! Provider abstraction and shared streaming machinery:
//!
//! - **Provider trait**: unified `stream_text` interface with caller-supplied
//!   callbacks and cooperative cancellation
//! - **SSE decoder**: frame reassembly from arbitrarily chunked byte streams
//! - **Tool-ID resolution**: sanitized wire names mapped back to registered
//!   tool IDs, with collision detection
//! - **Errors**: `ProviderError` taxonomy via `thiserror`

#![deny(unsafe_code)]

pub mod error;
pub mod provider;
pub mod sse;
pub mod tool_id;

pub use error::{ProviderError, ProviderResult};
pub use provider::{Provider, ProviderStreamOptions, StreamHandler};
pub use sse::{SseFrame, parse_sse_frames};
pub use tool_id::{ResolvedToolCall, ToolIdMap, sanitize_tool_id};

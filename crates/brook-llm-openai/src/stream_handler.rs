//! Per-stream accumulation state for chat-completion chunks.
//!
//! Text fragments pass straight through; tool-call fragments are merged into
//! index-addressed slots. Both the function name and its argument text may
//! arrive split across fragments, so each slot appends whatever pieces show
//! up for its index. Slots are only resolved against the tool-ID map once
//! the stream has ended — nothing about a tool call is surfaced before then.

use brook_llm::error::{ProviderError, ProviderResult};
use brook_llm::tool_id::{ResolvedToolCall, ToolIdMap};
use tracing::warn;

use crate::types::{ChatCompletionChunk, ChatDelta, ToolCallFragment};

// ─────────────────────────────────────────────────────────────────────────────
// State
// ─────────────────────────────────────────────────────────────────────────────

/// One in-progress tool call, keyed by its wire slot index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolCallSlot {
    /// Provider-assigned call ID; first fragment to carry one wins.
    pub call_id: Option<String>,
    /// Sanitized function name, appended across fragments.
    pub name: String,
    /// Raw argument text, appended across fragments.
    pub arguments: String,
}

/// Highest accepted tool-call slot index. The slot vector is sized by the
/// wire-supplied index, so an unchecked value would let a bad server request
/// an arbitrarily large allocation.
const MAX_TOOL_CALL_SLOTS: usize = 128;

/// Accumulation state for one stream.
#[derive(Debug, Default)]
pub struct StreamState {
    /// Sparse slot vector; `slots[i]` is `Some` once index `i` has appeared.
    slots: Vec<Option<ToolCallSlot>>,
}

impl StreamState {
    /// Fresh state for a new stream.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots seen so far (including any holes).
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chunk processing
// ─────────────────────────────────────────────────────────────────────────────

/// Parse one frame payload into a delta.
///
/// Returns `None` — with a warning — for payloads that don't parse or carry
/// no delta, so one garbled frame never takes the stream down.
pub fn extract_delta(payload: &str) -> Option<ChatDelta> {
    let chunk: ChatCompletionChunk = match serde_json::from_str(payload) {
        Ok(chunk) => chunk,
        Err(e) => {
            warn!(error = %e, "skipping malformed stream frame");
            return None;
        }
    };
    chunk.choices.into_iter().next()?.delta
}

/// Fold one delta into the state, returning its text fragment if any.
///
/// Tool-call fragments are absorbed silently; only text is surfaced here.
pub fn process_delta(delta: ChatDelta, state: &mut StreamState) -> Option<String> {
    if let Some(fragments) = delta.tool_calls {
        for fragment in fragments {
            accumulate(fragment, state);
        }
    }
    delta.content.filter(|text| !text.is_empty())
}

fn accumulate(fragment: ToolCallFragment, state: &mut StreamState) {
    let index = fragment.index;
    if index >= MAX_TOOL_CALL_SLOTS {
        warn!(index, "skipping tool-call fragment with out-of-range index");
        return;
    }
    if state.slots.len() <= index {
        state.slots.resize_with(index + 1, || None);
    }
    let slot = state.slots[index].get_or_insert_with(ToolCallSlot::default);

    if slot.call_id.is_none() {
        slot.call_id = fragment.id;
    }
    if let Some(function) = fragment.function {
        if let Some(name) = function.name {
            slot.name.push_str(&name);
        }
        if let Some(arguments) = function.arguments {
            slot.arguments.push_str(&arguments);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Finalization
// ─────────────────────────────────────────────────────────────────────────────

/// Resolve every accumulated slot after the stream has ended.
///
/// Slots are resolved in index order. All-or-nothing: the first slot whose
/// name is unknown or whose arguments don't parse fails the whole stream,
/// and no calls are returned.
pub fn finalize(state: StreamState, tool_ids: &ToolIdMap) -> ProviderResult<Vec<ResolvedToolCall>> {
    let mut resolved = Vec::new();
    for slot in state.slots.into_iter().flatten() {
        let tool_id = tool_ids.resolve(&slot.name).ok_or_else(|| {
            ProviderError::UnknownToolReference {
                name: slot.name.clone(),
            }
        })?;
        let arguments: serde_json::Value =
            serde_json::from_str(&slot.arguments).map_err(|e| {
                warn!(tool = %slot.name, error = %e, "tool arguments failed to parse");
                ProviderError::MalformedToolArguments {
                    name: slot.name.clone(),
                    raw: slot.arguments.clone(),
                }
            })?;
        resolved.push(ResolvedToolCall {
            tool_id: tool_id.to_string(),
            call_id: slot.call_id,
            arguments,
        });
    }
    Ok(resolved)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

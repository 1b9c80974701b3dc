//! # SSE Frame Decoder
//!
//! Reassembles Server-Sent Events `data:` frames from a raw byte stream.
//! Chat-completion APIs deliver responses as SSE over chunked HTTP, and chunk
//! boundaries fall anywhere — mid-line, mid-frame, even mid-way through a
//! multi-byte UTF-8 character. The decoder carries undecoded bytes across
//! chunks and only converts to `&str` once a complete line is buffered, so
//! split characters reassemble correctly.
//!
//! Frames after the `[DONE]` sentinel are never emitted, and a partial line
//! left in the buffer when the stream ends is discarded.
//!
//! The cancellation token is consulted before every chunk request: once
//! cancelled, the decoder stops pulling from the transport and ends, even
//! mid-line.

use bytes::{Bytes, BytesMut};
use futures::Stream;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// One decoded SSE frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SseFrame {
    /// A `data:` payload (raw JSON, unparsed).
    Data(String),
    /// The `data: [DONE]` terminal sentinel.
    Done,
}

impl SseFrame {
    /// Returns the payload if this is a data frame, `None` for `Done`.
    #[must_use]
    pub fn as_data(&self) -> Option<&str> {
        match self {
            Self::Data(payload) => Some(payload),
            Self::Done => None,
        }
    }
}

/// Decode SSE frames from a byte stream.
///
/// This is an async generator (implemented as a stream) that:
/// 1. Buffers incoming bytes without decoding them
/// 2. Splits on `\n`, stripping a trailing `\r`
/// 3. Extracts `data: ` payloads, skipping comments and non-data fields
/// 4. Yields [`SseFrame::Done`] for the `[DONE]` sentinel, then ends
/// 5. Propagates transport read errors as `Err` and ends
/// 6. Checks `cancel` before every chunk request and ends once it fires
///
/// A cancelled decoder ends without yielding; callers that need to tell
/// cancellation apart from natural exhaustion check the token after the
/// stream returns `None`.
pub fn parse_sse_frames<S, E>(
    byte_stream: S,
    cancel: CancellationToken,
) -> impl Stream<Item = Result<SseFrame, E>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + Unpin + 'static,
    E: Send + 'static,
{
    futures::stream::unfold(
        (byte_stream, BytesMut::with_capacity(8192), false, cancel),
        move |(mut stream, mut buffer, done, cancel)| async move {
            if done {
                return None;
            }

            loop {
                // Check buffer for a complete line (\n)
                if let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
                    // Split the line bytes out of the buffer (zero-copy split)
                    let mut line_bytes = buffer.split_to(newline_pos + 1);
                    // Remove trailing \n
                    line_bytes.truncate(line_bytes.len() - 1);
                    // Remove trailing \r if present
                    if line_bytes.last() == Some(&b'\r') {
                        line_bytes.truncate(line_bytes.len() - 1);
                    }

                    // Convert to &str only for the complete line
                    let line = match std::str::from_utf8(&line_bytes) {
                        Ok(s) => s,
                        Err(_) => continue, // skip invalid UTF-8 lines
                    };

                    match classify_line(line) {
                        Some(SseFrame::Done) => {
                            // Terminal: nothing after [DONE] is emitted
                            return Some((Ok(SseFrame::Done), (stream, buffer, true, cancel)));
                        }
                        Some(frame) => return Some((Ok(frame), (stream, buffer, false, cancel))),
                        None => continue,
                    }
                }

                // Never request another chunk after cancellation; whatever is
                // left in the buffer is an incomplete frame and is dropped
                if cancel.is_cancelled() {
                    debug!("cancelled; no further chunks requested");
                    return None;
                }

                // Read next chunk — append raw bytes, no conversion
                match stream.next().await {
                    Some(Ok(chunk)) => {
                        buffer.extend_from_slice(&chunk);
                    }
                    Some(Err(e)) => {
                        return Some((Err(e), (stream, buffer, true, cancel)));
                    }
                    None => {
                        // Stream ended — a partial line without its newline is
                        // never a complete frame, so drop it
                        if !buffer.is_empty() {
                            debug!(
                                bytes = buffer.len(),
                                "discarding partial SSE line at end of stream"
                            );
                        }
                        return None;
                    }
                }
            }
        },
    )
}

/// Classify an SSE line.
///
/// Returns `Some(Data)` for data payloads, `Some(Done)` for the `[DONE]`
/// sentinel, `None` for comments, empty lines, and non-data fields.
fn classify_line(line: &str) -> Option<SseFrame> {
    let trimmed = line.trim();

    // Skip empty lines and comments
    if trimmed.is_empty() || trimmed.starts_with(':') {
        return None;
    }

    // Extract "data: " payload
    let data = trimmed
        .strip_prefix("data: ")
        .or_else(|| trimmed.strip_prefix("data:"))?;

    let data = data.trim();

    if data == "[DONE]" {
        return Some(SseFrame::Done);
    }

    // Skip empty data
    if data.is_empty() {
        return None;
    }

    Some(SseFrame::Data(data.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! NDJSON framing of a streamed response body.
//!
//! Byte chunks are buffered until a full line is available; each line is fed
//! to a [`FragmentAccumulator`]. The byte stream is polled lazily and dropped
//! as soon as a terminal or failing fragment is seen.

use crate::llm::fragment::{FragmentAccumulator, Step};
use crate::llm::{ChatError, ChatMessage};
use futures::{Stream, StreamExt};
use tracing::warn;

/// Callback receiving each content chunk as it arrives
pub type ChunkObserver<'a> = dyn FnMut(&str) + Send + 'a;

/// Reduces a newline-delimited JSON byte stream to the final chat message.
///
/// # Arguments
/// * `byte_stream` - Response body as a stream of byte chunks
/// * `on_chunk` - Optional observer called with every content chunk, in order
///
/// # Returns
/// * `Result<ChatMessage, ChatError>` - Message whose content is the concatenation of all chunks
pub async fn accumulate_stream<S, B, E>(
    byte_stream: S,
    mut on_chunk: Option<&mut ChunkObserver<'_>>,
) -> Result<ChatMessage, ChatError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<ChatError>,
{
    let mut byte_stream = std::pin::pin!(byte_stream);
    let mut accumulator = FragmentAccumulator::new();
    let mut line_buf: Vec<u8> = Vec::new();
    // Bytes before this offset are known to hold no newline
    let mut scanned = 0;

    while let Some(chunk) = byte_stream.next().await {
        let chunk = chunk.map_err(Into::into)?;
        line_buf.extend_from_slice(chunk.as_ref());

        while let Some(offset) = line_buf[scanned..].iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = line_buf.drain(..=scanned + offset).collect();
            scanned = 0;
            if let Some(message) = feed_line(&mut accumulator, &line, &mut on_chunk)? {
                return Ok(message);
            }
        }
        scanned = line_buf.len();
    }

    // Last line may lack a trailing newline
    if !line_buf.is_empty() {
        if let Some(message) = feed_line(&mut accumulator, &line_buf, &mut on_chunk)? {
            return Ok(message);
        }
    }

    warn!(
        "Stream ended after {} fragments without terminal fragment",
        accumulator.fragments_seen()
    );
    Err(ChatError::IncompleteStream)
}

fn feed_line(
    accumulator: &mut FragmentAccumulator,
    raw: &[u8],
    on_chunk: &mut Option<&mut ChunkObserver<'_>>,
) -> Result<Option<ChatMessage>, ChatError> {
    let line = std::str::from_utf8(raw)
        .map_err(|e| ChatError::Decode(format!("invalid UTF-8 in stream: {e}")))?
        .trim();
    if line.is_empty() {
        return Ok(None);
    }

    match accumulator.push_line(line)? {
        Step::Chunk(text) => {
            if let Some(observer) = on_chunk.as_deref_mut() {
                observer(&text);
            }
            Ok(None)
        }
        Step::Ignored => Ok(None),
        Step::Done(message) => Ok(Some(message)),
    }
}

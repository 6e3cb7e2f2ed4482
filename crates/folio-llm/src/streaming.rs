use anyhow::Result;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::time::Duration;

use crate::buffer_utils::{parse_sse_stream, SseLineParser};
use crate::traits::ContentStream;
use crate::types::{GenerateChunk, StreamPayload};

/// Parses `alt=sse` payloads of `streamGenerateContent`
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiChunkParser;

impl SseLineParser for GeminiChunkParser {
    type Item = GenerateChunk;

    fn parse_data_line(&self, data: &str) -> Result<Vec<GenerateChunk>> {
        let payload: StreamPayload = serde_json::from_str(data)
            .map_err(|e| anyhow::anyhow!("Failed to parse generate chunk: {}", e))?;

        match payload {
            StreamPayload::Chunk(chunk) => Ok(vec![chunk]),
            StreamPayload::Error { error } => anyhow::bail!(
                "Gemini stream error ({}): {}",
                error.status.as_deref().unwrap_or("UNKNOWN"),
                error.message
            ),
        }
    }
}

/// Parse a chunked SSE body into generation chunks
pub fn parse_gemini_stream<S, B, E>(bytes: S) -> ContentStream
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    parse_sse_stream(bytes, GeminiChunkParser)
}

/// Fail the stream when the upstream goes quiet for longer than `idle`
///
/// The timer restarts on every item, so long answers are not cut off as
/// long as tokens keep arriving.
pub fn with_idle_timeout<T: Send + 'static>(
    stream: Pin<Box<dyn Stream<Item = Result<T>> + Send>>,
    idle: Duration,
) -> Pin<Box<dyn Stream<Item = Result<T>> + Send>> {
    with_chunk_timeouts(stream, idle, idle)
}

/// Like [`with_idle_timeout`], but the first item may take up to `first`
pub fn with_chunk_timeouts<T: Send + 'static>(
    stream: Pin<Box<dyn Stream<Item = Result<T>> + Send>>,
    first: Duration,
    idle: Duration,
) -> Pin<Box<dyn Stream<Item = Result<T>> + Send>> {
    Box::pin(async_stream::stream! {
        let mut stream = stream;
        let mut wait = first;

        loop {
            match tokio::time::timeout(wait, stream.next()).await {
                Ok(Some(item)) => {
                    wait = idle;
                    yield item;
                }
                Ok(None) => break,
                Err(_) => {
                    yield Err(anyhow::anyhow!("No data received from upstream for {:?}", wait));
                    break;
                }
            }
        }
    })
}

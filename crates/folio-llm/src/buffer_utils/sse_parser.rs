use anyhow::Result;
use futures::{Stream, StreamExt};
use std::fmt::Display;
use std::pin::Pin;

use super::buffering::CircularLineBuffer;

/// Strategy for turning SSE `data:` payloads into typed items
pub trait SseLineParser: Send {
    type Item: Send + 'static;

    /// Parse a data line into zero or more items
    fn parse_data_line(&self, data: &str) -> Result<Vec<Self::Item>>;

    /// Check if this line signals end of stream
    fn is_done_marker(&self, data: &str) -> bool {
        data == "[DONE]"
    }
}

enum LineOutcome<T> {
    Items(Vec<T>),
    Failed(anyhow::Error),
    Done,
    Skip,
}

fn handle_line<P: SseLineParser>(parser: &P, line: Result<String>) -> LineOutcome<P::Item> {
    let line = match line {
        Ok(line) => line,
        Err(e) => return LineOutcome::Failed(e),
    };

    // Blank separators, comments (":"), and event/id fields carry nothing for us
    let Some(data) = line.strip_prefix("data:") else {
        return LineOutcome::Skip;
    };
    let data = data.trim_start();

    if parser.is_done_marker(data) {
        return LineOutcome::Done;
    }

    match parser.parse_data_line(data) {
        Ok(items) => LineOutcome::Items(items),
        Err(e) => LineOutcome::Failed(e),
    }
}

/// Generic SSE stream parser over any chunked byte source
///
/// Items are yielded in the order their lines arrive. Transport errors end
/// the stream after being yielded; parse errors are yielded and parsing
/// continues with the next line.
pub fn parse_sse_stream<S, B, E, P>(
    bytes: S,
    parser: P,
) -> Pin<Box<dyn Stream<Item = Result<P::Item>> + Send>>
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
    P: SseLineParser + 'static,
{
    Box::pin(async_stream::stream! {
        let mut byte_chunks = Box::pin(bytes);
        let mut buffer = CircularLineBuffer::with_capacity(4096);
        let mut done = false;

        'read: while let Some(chunk_result) = byte_chunks.next().await {
            match chunk_result {
                Ok(bytes) => {
                    buffer.extend(bytes.as_ref());

                    while let Some(line) = buffer.next_line() {
                        match handle_line(&parser, line) {
                            LineOutcome::Items(items) => {
                                for item in items {
                                    yield Ok(item);
                                }
                            }
                            LineOutcome::Failed(e) => yield Err(e),
                            LineOutcome::Done => {
                                done = true;
                                break 'read;
                            }
                            LineOutcome::Skip => {}
                        }
                    }
                }
                Err(e) => {
                    yield Err(anyhow::anyhow!("Stream error: {}", e));
                    return;
                }
            }
        }

        if done {
            return;
        }

        if let Some(line) = buffer.take_remainder() {
            match handle_line(&parser, line) {
                LineOutcome::Items(items) => {
                    for item in items {
                        yield Ok(item);
                    }
                }
                LineOutcome::Failed(e) => yield Err(e),
                LineOutcome::Done | LineOutcome::Skip => {}
            }
        }
    })
}

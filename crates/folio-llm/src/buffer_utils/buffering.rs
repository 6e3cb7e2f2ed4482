use anyhow::Result;
use std::collections::VecDeque;

/// Circular buffer for line-based parsing of a chunked byte stream
pub struct CircularLineBuffer {
    buffer: VecDeque<u8>,
}

impl CircularLineBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
        }
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes);
    }

    /// Extract next line (up to \n), trimmed of surrounding whitespace and \r
    /// Returns None if no complete line is available
    pub fn next_line(&mut self) -> Option<Result<String>> {
        let newline_pos = self.buffer.iter().position(|&b| b == b'\n')?;
        let line_bytes: Vec<u8> = self.buffer.drain(..=newline_pos).collect();

        Some(decode(&line_bytes))
    }

    /// Drain whatever is left once the source is exhausted
    /// A final line without a trailing newline is still a line
    pub fn take_remainder(&mut self) -> Option<Result<String>> {
        if self.buffer.is_empty() {
            return None;
        }
        let line_bytes: Vec<u8> = self.buffer.drain(..).collect();

        Some(decode(&line_bytes))
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

fn decode(line_bytes: &[u8]) -> Result<String> {
    match std::str::from_utf8(line_bytes) {
        Ok(line_str) => Ok(line_str.trim().to_string()),
        Err(e) => Err(anyhow::anyhow!("Invalid UTF-8: {}", e)),
    }
}

use folio_chat::ResponseChunk;
use std::io::{self, Write};

use crate::cli::OutputFormat;

/// Writes streamed chunks as they arrive
pub struct ChunkRenderer<W: Write> {
    out: W,
    format: OutputFormat,
    wrote_any: bool,
}

impl<W: Write> ChunkRenderer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            wrote_any: false,
        }
    }

    pub fn render(&mut self, chunk: &ResponseChunk) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, chunk)?;
                writeln!(self.out)?;
            }
            OutputFormat::Text => match chunk {
                ResponseChunk::Text(text) => write!(self.out, "{}", text)?,
                ResponseChunk::Sources(sources) => {
                    write!(self.out, "\n\nSources:")?;
                    for (idx, source) in sources.iter().enumerate() {
                        write!(self.out, "\n  [{}] {}\n      {}", idx + 1, source.title, source.uri)?;
                    }
                }
            },
        }
        self.wrote_any = true;
        self.out.flush()
    }

    /// Terminate the answer line in text mode
    pub fn finish(&mut self) -> io::Result<()> {
        if self.format == OutputFormat::Text && self.wrote_any {
            writeln!(self.out)?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

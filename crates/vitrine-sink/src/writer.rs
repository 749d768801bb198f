//! Writer-backed sink.

use std::io::Write;

use serde::Serialize;
use vitrine_core::InvocationError;

use crate::sink::ResponseSink;

/// Writes each emitted payload as one JSON document followed by a newline.
pub struct WriterSink<W: Write> {
    writer: W,
    pretty: bool,
    emitted: usize,
}

impl<W: Write> WriterSink<W> {
    /// Create a sink writing compact JSON.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
            emitted: 0,
        }
    }

    /// Write indented JSON instead of compact JSON.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.pretty = enabled;
        self
    }

    /// Number of payloads written so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W, P> ResponseSink<P> for WriterSink<W>
where
    W: Write,
    P: Serialize + ?Sized,
{
    fn emit(&mut self, payload: &P) -> Result<(), InvocationError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, payload)?;
        } else {
            serde_json::to_writer(&mut self.writer, payload)?;
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.emitted += 1;
        Ok(())
    }
}

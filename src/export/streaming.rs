use std::io::{self, Write};

use crate::export::TextSink;

/// Forwards every chunk straight to a writer and flushes it, so each
/// fragment is observable as soon as it is placed. Nothing is retained.
#[derive(Debug)]
pub struct StreamingSink<W: Write> {
    writer: W,
}

impl<W: Write> StreamingSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TextSink for StreamingSink<W> {
    fn emit(&mut self, chunk: &str) -> io::Result<()> {
        self.writer.write_all(chunk.as_bytes())?;
        self.writer.flush()
    }

    fn end_page(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

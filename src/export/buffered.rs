use std::io;

use crate::export::TextSink;

/// Collects a whole document in memory and hands it over at the end.
#[derive(Debug, Clone, Default)]
pub struct BufferedSink {
    text: String,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl TextSink for BufferedSink {
    fn emit(&mut self, chunk: &str) -> io::Result<()> {
        self.text.push_str(chunk);
        Ok(())
    }
}

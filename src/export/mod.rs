pub mod buffered;
pub mod streaming;

use std::io;

pub use buffered::BufferedSink;
pub use streaming::StreamingSink;

/// Destination for reconstructed text, fed chunk by chunk in emission order.
pub trait TextSink {
    fn emit(&mut self, chunk: &str) -> io::Result<()>;

    /// Called once a page's text (and any trailing marker) has been emitted.
    fn end_page(&mut self) -> io::Result<()> {
        Ok(())
    }
}

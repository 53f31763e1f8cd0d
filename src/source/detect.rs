use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Enough bytes for every signature `image` knows plus the PDF marker.
const SNIFF_LEN: usize = 64;
const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Image,
    Unsupported,
}

/// Classifies a file by its leading bytes, ignoring its extension.
pub fn detect(path: &Path) -> io::Result<FileKind> {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)?;
    Ok(classify(&head))
}

pub fn classify(head: &[u8]) -> FileKind {
    if head.starts_with(PDF_MAGIC) {
        FileKind::Pdf
    } else if image::guess_format(head).is_ok() {
        FileKind::Image
    } else {
        FileKind::Unsupported
    }
}

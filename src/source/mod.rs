pub mod detect;
pub mod image;
pub mod pdf;

pub use detect::{detect, FileKind};
pub use pdf::{PdfDocument, PopplerTools};

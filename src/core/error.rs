use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a single input file produced no output.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported file type: {}", .0.display())]
    Unsupported(PathBuf),

    #[error("cannot decode image {}: {source:#}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("cannot open PDF {}: {source:#}", .path.display())]
    Rasterize {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("no page of {} could be recognized ({failed} failed)", .path.display())]
    NoPagesRecognized { path: PathBuf, failed: usize },

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

impl FileError {
    /// Output failures abort the whole run; everything else only skips the file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FileError::Output(_))
    }
}

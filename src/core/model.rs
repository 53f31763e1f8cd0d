use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::geometry::Quad;

/// One recognized line or fragment on a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextObservation {
    pub text: String,
    pub quad: Quad,
}

impl TextObservation {
    pub fn new(text: impl Into<String>, quad: Quad) -> Self {
        Self {
            text: text.into(),
            quad,
        }
    }

    pub fn start(&self) -> i64 {
        self.quad.start_column()
    }

    pub fn end(&self) -> i64 {
        self.quad.end_column()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A decoded or rasterized page, ready for recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    pub path: PathBuf,
    pub page_idx: usize,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentReport {
    pub pages_total: usize,
    pub pages_emitted: usize,
    pub pages_empty: usize,
    pub page_failures: usize,
}

impl DocumentReport {
    /// No page made it through recognition, including zero-page documents.
    pub fn is_total_failure(&self) -> bool {
        self.pages_emitted + self.pages_empty == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_total: usize,
    pub files_failed: usize,
}

impl RunSummary {
    pub fn exit_code(&self) -> u8 {
        u8::try_from(self.files_failed).unwrap_or(u8::MAX)
    }
}

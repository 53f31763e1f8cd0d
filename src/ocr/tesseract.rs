use std::process::Command;

use anyhow::{Context, Result};

use crate::core::geometry::BBox;
use crate::core::model::{PageImage, TextObservation};
use crate::ocr::RecognitionEngine;

const LEVEL_PAGE: u32 = 1;
const LEVEL_LINE: u32 = 4;
const LEVEL_WORD: u32 = 5;

/// Runs the `tesseract` CLI and turns its TSV report into line fragments.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    program: String,
    lang: String,
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TesseractEngine {
    pub fn new() -> Self {
        Self {
            program: "tesseract".to_string(),
            lang: "eng".to_string(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_lang(mut self, lang: String) -> Self {
        self.lang = lang;
        self
    }
}

impl RecognitionEngine for TesseractEngine {
    fn recognize(&self, page: &PageImage) -> Result<Vec<TextObservation>> {
        let output = Command::new(&self.program)
            .arg(&page.path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .arg("tsv")
            .output()
            .with_context(|| format!("failed to invoke {}; is tesseract installed?", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("tesseract failed ({}): {}", output.status, stderr.trim());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_tsv(&stdout, page.width, page.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineKey {
    page: u32,
    block: u32,
    par: u32,
    line: u32,
}

#[derive(Debug)]
struct TsvLine {
    key: LineKey,
    bbox: BBox,
    words: Vec<String>,
}

/// Groups word rows under their line rows. Line boxes are normalized by the
/// page size tesseract reports, or by the fallback size if it reports none.
pub fn parse_tsv(tsv: &str, fallback_width: u32, fallback_height: u32) -> Result<Vec<TextObservation>> {
    let mut rows = tsv.lines();
    let header = rows.next().unwrap_or_default();
    if !header.starts_with("level") {
        anyhow::bail!("unexpected tesseract TSV header: {header:?}");
    }

    let (mut width, mut height) = (fallback_width, fallback_height);
    let mut lines: Vec<TsvLine> = Vec::new();

    for (idx, row) in rows.enumerate() {
        if row.trim().is_empty() {
            continue;
        }
        let cols: Vec<&str> = row.splitn(12, '\t').collect();
        if cols.len() < 11 {
            anyhow::bail!("malformed tesseract TSV row {}: {row:?}", idx + 2);
        }
        let num = |i: usize| -> Result<u32> {
            cols[i]
                .trim()
                .parse::<u32>()
                .with_context(|| format!("bad number in TSV row {}: {:?}", idx + 2, cols[i]))
        };

        let level = num(0)?;
        let key = LineKey {
            page: num(1)?,
            block: num(2)?,
            par: num(3)?,
            line: num(4)?,
        };
        let (left, top, w, h) = (num(6)?, num(7)?, num(8)?, num(9)?);

        match level {
            LEVEL_PAGE if w > 0 && h > 0 => {
                width = w;
                height = h;
            }
            LEVEL_LINE => lines.push(TsvLine {
                key,
                bbox: BBox::new(
                    f64::from(left),
                    f64::from(top),
                    f64::from(left) + f64::from(w),
                    f64::from(top) + f64::from(h),
                ),
                words: Vec::new(),
            }),
            LEVEL_WORD => {
                let word = cols.get(11).map(|t| t.trim()).unwrap_or_default();
                if word.is_empty() {
                    continue;
                }
                if let Some(line) = lines.iter_mut().rev().find(|l| l.key == key) {
                    line.words.push(word.to_string());
                }
            }
            _ => {}
        }
    }

    Ok(lines
        .into_iter()
        .filter(|line| !line.words.is_empty())
        .map(|line| {
            let quad = line.bbox.normalized(width, height).to_quad();
            TextObservation::new(line.words.join(" "), quad)
        })
        .collect())
}

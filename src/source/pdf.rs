use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::core::model::PageImage;
use crate::source::image as page_image;

/// Rendered pages overwrite one another; only the current page is on disk.
const PAGE_PREFIX: &str = "page";

/// Locations of the poppler binaries used to inspect and render PDFs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopplerTools {
    pub pdfinfo: PathBuf,
    pub pdftoppm: PathBuf,
}

impl Default for PopplerTools {
    fn default() -> Self {
        Self {
            pdfinfo: PathBuf::from("pdfinfo"),
            pdftoppm: PathBuf::from("pdftoppm"),
        }
    }
}

/// A PDF opened for page-by-page rasterization with poppler's tools.
///
/// Pages must be consumed in sequence: rendering a page replaces the image
/// of the previous one in the scratch directory.
#[derive(Debug)]
pub struct PdfDocument {
    path: PathBuf,
    page_count: usize,
    dpi: u32,
    tools: PopplerTools,
    scratch: TempDir,
}

impl PdfDocument {
    pub fn open(path: &Path, dpi: u32) -> Result<Self> {
        Self::open_with(path, dpi, PopplerTools::default())
    }

    pub fn open_with(path: &Path, dpi: u32, tools: PopplerTools) -> Result<Self> {
        let page_count = page_count(&tools.pdfinfo, path)?;
        let scratch = tempfile::Builder::new()
            .prefix("pagetext-")
            .tempdir()
            .with_context(|| "failed to create scratch directory for rendered pages")?;
        Ok(Self {
            path: path.to_path_buf(),
            page_count,
            dpi,
            tools,
            scratch,
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }

    /// Renders pages lazily, one per iteration step.
    pub fn pages(&self) -> impl Iterator<Item = Result<PageImage>> + '_ {
        (0..self.page_count).map(move |page_idx| self.render_page(page_idx))
    }

    pub fn render_page(&self, page_idx: usize) -> Result<PageImage> {
        // pdftoppm uses 1-based page indices
        let page_number = page_idx + 1;
        let prefix = self.scratch.path().join(PAGE_PREFIX);
        // -singlefile writes exactly `<prefix>.png`
        let image_path = prefix.with_extension("png");

        // A stale image must not pass for this page if rendering fails.
        match fs::remove_file(&image_path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => {
                return Err(err).with_context(|| {
                    format!("failed to remove previous page {}", image_path.display())
                });
            }
            _ => {}
        }

        let output = Command::new(&self.tools.pdftoppm)
            .arg("-png")
            .arg("-singlefile")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-f")
            .arg(page_number.to_string())
            .arg("-l")
            .arg(page_number.to_string())
            .arg(&self.path)
            .arg(&prefix)
            .output()
            .with_context(|| "failed to invoke pdftoppm; is poppler-utils installed?")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "pdftoppm failed on page {page_number} ({}): {}",
                output.status,
                stderr.trim()
            );
        }

        if !image_path.exists() {
            anyhow::bail!(
                "expected rendered image not found: {}",
                image_path.display()
            );
        }

        page_image::decode(&image_path, page_idx)
    }
}

fn page_count(pdfinfo: &Path, pdf_path: &Path) -> Result<usize> {
    let output = Command::new(pdfinfo)
        .arg(pdf_path)
        .output()
        .with_context(|| format!("failed to invoke pdfinfo on {}", pdf_path.display()))?;

    if !output.status.success() {
        anyhow::bail!("pdfinfo failed with status: {}", output.status);
    }

    parse_page_count(&String::from_utf8_lossy(&output.stdout))
}

fn parse_page_count(info: &str) -> Result<usize> {
    for line in info.lines() {
        if let Some(rest) = line.strip_prefix("Pages:") {
            let num_str = rest.trim();
            let pages: usize = num_str.parse().with_context(|| {
                format!("failed to parse page count from 'Pages:' line: {num_str}")
            })?;
            return Ok(pages);
        }
    }

    anyhow::bail!("pdfinfo output did not contain a 'Pages:' line");
}

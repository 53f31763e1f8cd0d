use std::io;
use std::iter;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{error, info};

use crate::config::{Options, PipelineConfig};
use crate::core::error::FileError;
use crate::core::model::{DocumentReport, PageImage, RunSummary};
use crate::export::TextSink;
use crate::layout::{arrange, reconstruct_into, Reconstruction};
use crate::ocr::filter::sanitize;
use crate::ocr::RecognitionEngine;
use crate::source::{detect, image as page_image, FileKind, PdfDocument};

const PAGE_BREAK: &str = "\x0c";

/// Drives recognition and reconstruction over the pages of one document.
pub struct PageAggregator<'a> {
    engine: &'a dyn RecognitionEngine,
    options: &'a Options,
    page_break: bool,
}

impl<'a> PageAggregator<'a> {
    pub fn new(engine: &'a dyn RecognitionEngine, options: &'a Options) -> Self {
        Self {
            engine,
            options,
            page_break: options.page_break,
        }
    }

    /// Single images never get a page-break marker.
    pub fn without_page_breaks(mut self) -> Self {
        self.page_break = false;
        self
    }

    /// Processes pages strictly in order. A page that fails to render or
    /// recognize is counted and skipped; only sink errors stop the document.
    pub fn process<I, S>(&self, pages: I, sink: &mut S) -> io::Result<DocumentReport>
    where
        I: IntoIterator<Item = Result<PageImage>>,
        S: TextSink + ?Sized,
    {
        let mut report = DocumentReport::default();

        for (idx, page) in pages.into_iter().enumerate() {
            report.pages_total += 1;
            let page_number = idx + 1;

            let page = match page {
                Ok(page) => page,
                Err(err) => {
                    error!("page {page_number}: {err:#}");
                    report.page_failures += 1;
                    continue;
                }
            };

            let mut observations = match self.engine.recognize(&page) {
                Ok(observations) => sanitize(observations),
                Err(err) => {
                    error!("page {page_number}: recognition failed: {err:#}");
                    report.page_failures += 1;
                    continue;
                }
            };
            arrange(&mut observations, self.options.reading_order);

            match reconstruct_into(&observations, self.options, sink)? {
                Reconstruction::EmptyInput => {
                    info!("page {page_number}: no text recognized");
                    report.pages_empty += 1;
                }
                Reconstruction::Emitted { fragments } => {
                    sink.emit("\n")?;
                    if self.page_break {
                        sink.emit(PAGE_BREAK)?;
                    }
                    sink.end_page()?;
                    info!("page {page_number}: {fragments} fragments");
                    report.pages_emitted += 1;
                }
            }
        }

        Ok(report)
    }
}

/// Detects, opens and reconstructs one input file into `sink`.
pub fn process_file<S: TextSink + ?Sized>(
    path: &Path,
    config: &PipelineConfig,
    engine: &dyn RecognitionEngine,
    sink: &mut S,
) -> Result<DocumentReport, FileError> {
    let kind = detect(path).map_err(|source| FileError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let aggregator = PageAggregator::new(engine, &config.options);
    let report = match kind {
        FileKind::Pdf => {
            let document = PdfDocument::open_with(path, config.dpi, config.poppler.clone())
                .map_err(|source| FileError::Rasterize {
                    path: path.to_path_buf(),
                    source,
                })?;
            info!("{}: PDF with {} pages", path.display(), document.page_count());
            aggregator.process(document.pages(), sink)?
        }
        FileKind::Image => {
            let page = page_image::decode(path, 0).map_err(|source| FileError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
            info!("{}: {}x{} image", path.display(), page.width, page.height);
            aggregator
                .without_page_breaks()
                .process(iter::once(Ok(page)), sink)?
        }
        FileKind::Unsupported => return Err(FileError::Unsupported(path.to_path_buf())),
    };

    if report.is_total_failure() {
        return Err(FileError::NoPagesRecognized {
            path: path.to_path_buf(),
            failed: report.page_failures,
        });
    }
    Ok(report)
}

/// Processes every file in order. Per-file failures are counted; an output
/// failure aborts the run.
pub fn run<S: TextSink + ?Sized>(
    files: &[PathBuf],
    config: &PipelineConfig,
    engine: &dyn RecognitionEngine,
    sink: &mut S,
) -> Result<RunSummary, FileError> {
    let mut summary = RunSummary::default();

    for path in files {
        summary.files_total += 1;
        info!("processing {}", path.display());

        match process_file(path, config, engine, sink) {
            Ok(report) if report.page_failures > 0 => info!(
                "{}: {} of {} pages failed",
                path.display(),
                report.page_failures,
                report.pages_total
            ),
            Ok(_) => {}
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                error!("{err}");
                summary.files_failed += 1;
            }
        }
    }

    Ok(summary)
}

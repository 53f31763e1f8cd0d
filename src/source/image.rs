use std::path::Path;

use anyhow::{Context, Result};
use image::ImageReader;

use crate::core::model::PageImage;

/// Opens an image and reads its pixel size from the decoded header.
pub fn decode(path: &Path, page_idx: usize) -> Result<PageImage> {
    let (width, height) = ImageReader::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("failed to sniff image format of {}", path.display()))?
        .into_dimensions()
        .with_context(|| format!("failed to decode {}", path.display()))?;

    if width == 0 || height == 0 {
        anyhow::bail!("image {} has no pixels", path.display());
    }

    Ok(PageImage {
        path: path.to_path_buf(),
        page_idx,
        width,
        height,
    })
}

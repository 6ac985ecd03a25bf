//! Advisory detection of very large images
//!
//! Nothing here can fail: an image whose header cannot be read is skipped,
//! and the real decode error surfaces during assembly instead.

use crate::constants::DEFAULT_SIZE_WARNING_PIXELS;
use crate::types::SizeWarning;
use image::{ImageReader, ImageResult};
use pdf_collect::ImagePath;
use std::fmt;
use std::path::Path;

/// Audit against the default 40 MP threshold
pub fn audit(images: &[ImagePath]) -> Vec<SizeWarning> {
    audit_with_threshold(images, DEFAULT_SIZE_WARNING_PIXELS)
}

/// Report every image whose pixel area reaches `threshold`.
///
/// Only image headers are read. The format comes from the content, as in
/// assembly, so a misnamed file is still measured.
pub fn audit_with_threshold(images: &[ImagePath], threshold: u64) -> Vec<SizeWarning> {
    images
        .iter()
        .filter_map(|image| match dimensions(image.path()) {
            Ok((width, height)) => {
                is_oversized(width, height, threshold).then(|| SizeWarning {
                    file_name: image.file_name(),
                    width,
                    height,
                })
            }
            Err(e) => {
                log::warn!(
                    "Skipping size check for {}: {}",
                    image.path().display(),
                    e
                );
                None
            }
        })
        .collect()
}

fn dimensions(path: &Path) -> ImageResult<(u32, u32)> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()
}

pub fn is_oversized(width: u32, height: u32, threshold: u64) -> bool {
    u64::from(width) * u64::from(height) >= threshold
}

/// The first few warnings plus a count of the rest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningSummary<'a> {
    pub listed: &'a [SizeWarning],
    pub remaining: usize,
}

pub fn summarize_warnings(warnings: &[SizeWarning], limit: usize) -> WarningSummary<'_> {
    let shown = warnings.len().min(limit);
    WarningSummary {
        listed: &warnings[..shown],
        remaining: warnings.len() - shown,
    }
}

impl fmt::Display for WarningSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, warning) in self.listed.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", warning)?;
        }
        if self.remaining > 0 {
            if !self.listed.is_empty() {
                writeln!(f)?;
            }
            write!(f, "... and {} more", self.remaining)?;
        }
        Ok(())
    }
}

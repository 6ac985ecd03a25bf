use crate::types::{ImageKind, ImagePath};
use std::path::Path;

/// Extensions recognised as convertible (compared case-insensitively)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// True iff `path` is an existing regular file with a JPG/PNG extension.
///
/// Never fails: unreadable or malformed paths are simply not images.
pub fn is_image(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    ImageKind::from_extension(path).is_some() && path.is_file()
}

impl ImagePath {
    /// Classify and resolve a path.
    ///
    /// Returns `None` for anything [`is_image`] rejects or that cannot be
    /// canonicalized.
    pub fn classify(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let kind = ImageKind::from_extension(path)?;
        if !path.is_file() {
            return None;
        }
        let resolved = path.canonicalize().ok()?;
        Some(ImagePath::new(resolved, kind))
    }
}

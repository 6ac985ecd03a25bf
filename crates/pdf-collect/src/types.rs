use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("No JPG/PNG images found in the selection")]
    EmptySelection,
    #[error("Invalid path set: {0}")]
    InvalidPathSet(String),
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CollectError>;

/// Raster formats accepted as page sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    /// Classify by file extension, case-insensitively
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            "png" => Some(ImageKind::Png),
            _ => None,
        }
    }
}

/// A resolved path to an existing JPG/PNG file.
///
/// Only constructed through [`ImagePath::classify`], so holding one means the
/// file existed and carried a supported extension at classification time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImagePath {
    path: PathBuf,
    kind: ImageKind,
}

impl ImagePath {
    pub(crate) fn new(path: PathBuf, kind: ImageKind) -> Self {
        Self { path, kind }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    /// File name for display; lossy for non-UTF-8 names
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl AsRef<Path> for ImagePath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// How the current selection was made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// A folder was picked (or dropped); `source` is that folder
    FromFolder,
    /// Individual files were picked; `source` is their common ancestor
    FromFiles,
}

/// What the user currently wants converted.
///
/// Never mutated after creation: every pick or drop builds a new value that
/// replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    mode: SelectionMode,
    source: PathBuf,
    images: Vec<ImagePath>,
}

impl SelectionState {
    pub(crate) fn new(mode: SelectionMode, source: PathBuf, images: Vec<ImagePath>) -> Self {
        Self {
            mode,
            source,
            images,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Always a directory, never a file path
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Images in natural order, unique by resolved path
    pub fn images(&self) -> &[ImagePath] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// An empty selection is valid state but must not be assembled
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("No images to assemble")]
    NoImages,
    #[error("Unsupported image format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Invalid JPEG {}: {reason}", .path.display())]
    Jpeg { path: PathBuf, reason: String },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to move output into place: {0}")]
    Persist(#[from] tempfile::PersistError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, AssembleError>;

/// Advisory record for an image large enough to bloat the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeWarning {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

impl SizeWarning {
    pub fn pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for SizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x{})", self.file_name, self.width, self.height)
    }
}

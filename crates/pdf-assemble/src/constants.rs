//! Shared constants for merging images into a PDF

// =============================================================================
// Size Audit
// =============================================================================

/// Pixel area at which an image is reported as oversized (40 MP)
pub const DEFAULT_SIZE_WARNING_PIXELS: u64 = 40_000_000;

/// How many size warnings a caller lists before summarising the rest
pub const DEFAULT_MAX_LISTED_WARNINGS: usize = 10;

// =============================================================================
// Output Naming
// =============================================================================

/// Folder created under the selection source when no output folder is set
pub const RESULT_DIR_NAME: &str = "result";

/// Prefix of generated output file names
pub const OUTPUT_FILE_PREFIX: &str = "merged_";

/// `chrono` format for the timestamp part of generated names
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// =============================================================================
// Document
// =============================================================================

pub const PDF_VERSION: &str = "1.7";

/// Value written to the document Info /Producer entry
pub const PRODUCER: &str = concat!("imgmerge ", env!("CARGO_PKG_VERSION"));

/// Resource name of the single image placed on each page
pub(crate) const PAGE_IMAGE_NAME: &str = "Im0";

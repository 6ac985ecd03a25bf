//! Image selection for PDF merging
//!
//! Turns a folder, an explicit file list, or a drag-and-drop payload into an
//! ordered, immutable [`SelectionState`] ready for assembly.

mod classify;
mod collect;
mod drop;
mod natural;
mod request;
mod types;

pub use classify::{SUPPORTED_EXTENSIONS, is_image};
pub use collect::{common_ancestor, from_files, from_folder, sort_images};
pub use drop::{collect_dropped, parse_drop_payload};
pub use natural::{NaturalKey, natural_cmp};
pub use request::CollectRequest;
pub use types::*;

//! Worker protocol for image merging
//!
//! A front end sends [`MergeCommand`]s and receives [`MergeUpdate`]s; the
//! work itself runs in [`worker_task`], off the caller's thread.

use std::path::PathBuf;
use std::sync::Arc;

mod worker;

// Re-export types from library crates
pub use pdf_assemble::{MergeOptions, SizeWarning};
pub use pdf_collect::{CollectRequest, SelectionState};
pub use worker::worker_task;

/// Commands sent from the front end to the worker
#[derive(Debug)]
pub enum MergeCommand {
    /// Build a new selection from a folder, files, or a drop
    Collect { request: CollectRequest },
    /// Assemble a selection into one PDF.
    ///
    /// `output` is an exact path; when absent a timestamped name under the
    /// options' output folder (or `<source>/result`) is used.
    Generate {
        selection: Arc<SelectionState>,
        options: MergeOptions,
        output: Option<PathBuf>,
    },
}

/// Updates sent from the worker to the front end
#[derive(Debug, Clone)]
pub enum MergeUpdate {
    /// A new selection replaces the previous one
    Selected { selection: Arc<SelectionState> },
    /// Nothing usable was picked; the previous selection stays current
    EmptySelection { message: String },
    /// Advisory only; assembly carries on
    SizeWarnings { warnings: Vec<SizeWarning> },
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    Complete { path: PathBuf, page_count: usize },
    Error { message: String },
}

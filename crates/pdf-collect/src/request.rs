use crate::collect::{from_files, from_folder};
use crate::drop::collect_dropped;
use crate::types::*;
use std::path::PathBuf;

/// One user action that produces a new selection
#[derive(Debug, Clone, PartialEq)]
pub enum CollectRequest {
    /// A folder was picked
    Folder { path: PathBuf, recursive: bool },
    /// Files were picked
    Files { paths: Vec<PathBuf> },
    /// Something was dropped onto the window
    Drop { payload: String, recursive: bool },
}

impl CollectRequest {
    /// Run the request against the filesystem
    pub fn collect(&self) -> Result<SelectionState> {
        match self {
            CollectRequest::Folder { path, recursive } => from_folder(path, *recursive),
            CollectRequest::Files { paths } => from_files(paths),
            CollectRequest::Drop { payload, recursive } => collect_dropped(payload, *recursive),
        }
    }
}

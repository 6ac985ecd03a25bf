//! Building a [`SelectionState`] from a folder or from explicit files

use crate::natural::NaturalKey;
use crate::types::*;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Enumerate the images in `folder`, optionally descending into subfolders.
///
/// An empty result is not an error; the caller decides how to surface it.
pub fn from_folder(folder: impl AsRef<Path>, recursive: bool) -> Result<SelectionState> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Err(CollectError::NotADirectory(folder.to_path_buf()));
    }
    let folder = folder.canonicalize()?;

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut seen = HashSet::new();
    let mut images = Vec::new();

    for entry in WalkDir::new(&folder).min_depth(1).max_depth(max_depth) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        if let Some(image) = ImagePath::classify(entry.path()) {
            if seen.insert(image.path().to_path_buf()) {
                images.push(image);
            }
        }
    }

    sort_images(&mut images);
    log::info!(
        "Collected {} image(s) from {}{}",
        images.len(),
        folder.display(),
        if recursive { " (recursive)" } else { "" }
    );

    Ok(SelectionState::new(SelectionMode::FromFolder, folder, images))
}

/// Build a selection from explicitly chosen files.
///
/// Non-images are dropped silently; if nothing remains the result is
/// [`CollectError::EmptySelection`].
pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<SelectionState> {
    let mut seen = HashSet::new();
    let mut images: Vec<ImagePath> = paths
        .iter()
        .filter_map(|path| ImagePath::classify(path))
        .filter(|image| seen.insert(image.path().to_path_buf()))
        .collect();

    if images.is_empty() {
        return Err(CollectError::EmptySelection);
    }

    sort_images(&mut images);
    let source = common_ancestor(&images)?;
    log::info!(
        "Collected {} of {} file(s), source {}",
        images.len(),
        paths.len(),
        source.display()
    );

    Ok(SelectionState::new(SelectionMode::FromFiles, source, images))
}

/// Sort by file name in natural order.
///
/// Equal names from different subfolders are ordered by their full path so
/// the result is deterministic.
pub fn sort_images(images: &mut [ImagePath]) {
    images.sort_by_cached_key(|image| {
        (
            NaturalKey::new(&image.file_name()),
            NaturalKey::new(&image.path().to_string_lossy()),
        )
    });
}

/// Deepest directory containing every file in `paths`.
///
/// Works component-wise on each file's parent, so `/x/ab` and `/x/abc`
/// share `/x`, never `/x/ab`. Paths with nothing in common (different
/// drives, or relative paths with no shared leading folder) are rejected.
pub fn common_ancestor<P: AsRef<Path>>(paths: &[P]) -> Result<PathBuf> {
    let mut parents = paths.iter().map(|p| parent_dir(p.as_ref()));

    let first = parents
        .next()
        .ok_or_else(|| CollectError::InvalidPathSet("no paths given".to_string()))?;
    let mut shared: Vec<Component> = first.components().collect();

    for parent in parents {
        let matching = shared
            .iter()
            .zip(parent.components())
            .take_while(|(a, b)| **a == *b)
            .count();
        shared.truncate(matching);
    }

    if shared.is_empty() {
        return Err(CollectError::InvalidPathSet(
            "paths share no common root".to_string(),
        ));
    }

    Ok(shared.iter().collect())
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(path)
}

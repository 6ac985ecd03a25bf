//! Output location for a merge run

use crate::constants::{OUTPUT_FILE_PREFIX, OUTPUT_TIMESTAMP_FORMAT, RESULT_DIR_NAME};
use chrono::{DateTime, Local, TimeZone};
use pdf_collect::SelectionState;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Where one assembly run writes its PDF.
///
/// Built fresh for every run and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    dir: PathBuf,
    stem: String,
}

impl OutputTarget {
    /// `override_dir` wins over `<source>/result`; the name carries `now`
    /// at one-second resolution.
    pub fn new<Tz>(source: &Path, override_dir: Option<&Path>, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let dir = match override_dir {
            Some(dir) => dir.to_path_buf(),
            None => source.join(RESULT_DIR_NAME),
        };
        let stem = format!(
            "{}{}",
            OUTPUT_FILE_PREFIX,
            now.format(OUTPUT_TIMESTAMP_FORMAT)
        );
        Self { dir, stem }
    }

    /// Target for a selection, stamped with the current local time
    pub fn for_selection(selection: &SelectionState, override_dir: Option<&Path>) -> Self {
        Self::new(selection.source(), override_dir, &Local::now())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.stem)
    }

    /// The generated path, whether or not something already lives there
    pub fn path(&self) -> PathBuf {
        self.dir.join(self.file_name())
    }

    /// Every name this target may use, in order: the generated one, then
    /// `_1`, `_2`, ... appended to the stem.
    pub fn candidates(&self) -> impl Iterator<Item = PathBuf> + '_ {
        std::iter::once(self.path()).chain(
            (1..=u32::MAX).map(move |n| self.dir.join(format!("{}_{}.pdf", self.stem, n))),
        )
    }

    /// First candidate that does not exist right now.
    ///
    /// Only a preview: another run may claim it before anything is written.
    /// [`crate::assemble_into`] claims its name atomically.
    pub fn resolve(&self) -> PathBuf {
        self.candidates()
            .find(|candidate| !candidate.exists())
            .unwrap_or_else(|| self.path())
    }
}

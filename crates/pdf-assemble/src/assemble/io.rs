//! All-or-nothing output writing

use crate::output::OutputTarget;
use crate::types::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Write `bytes` to `path`, creating parent folders as needed.
///
/// The data lands in a temporary file next to the target and is renamed
/// over it only once fully written, so a failure never leaves a truncated
/// file at `path`. An existing file at `path` is replaced.
pub(crate) async fn save_pdf(bytes: Vec<u8>, path: &Path) -> Result<()> {
    let dir = parent_dir(path);
    tokio::fs::create_dir_all(&dir).await?;

    let path = path.to_owned();
    tokio::task::spawn_blocking(move || {
        write_temp(&dir, &bytes)?.persist(&path)?;
        Ok(())
    })
    .await?
}

/// Write `bytes` under the first free name of `target` and return it.
///
/// Names are claimed without replacing anything, so concurrent runs that
/// share a timestamp each get their own file.
pub(crate) async fn save_pdf_new(bytes: Vec<u8>, target: &OutputTarget) -> Result<PathBuf> {
    let dir = target.dir().to_path_buf();
    tokio::fs::create_dir_all(&dir).await?;

    let target = target.clone();
    tokio::task::spawn_blocking(move || {
        let mut temp = write_temp(&dir, &bytes)?;
        for candidate in target.candidates() {
            match temp.persist_noclobber(&candidate) {
                Ok(_) => return Ok(candidate),
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                    log::debug!("{} exists, trying next name", candidate.display());
                    temp = e.file;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(AssembleError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free output name in {}", target.dir().display()),
        )))
    })
    .await?
}

fn write_temp(dir: &Path, bytes: &[u8]) -> Result<NamedTempFile> {
    let mut temp = tempfile::Builder::new()
        .prefix(".merged-")
        .suffix(".pdf.part")
        .tempfile_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    Ok(temp)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

//! Paired output writing.
//!
//! Both artefacts are first written to temporary files beside their
//! destinations. Only when both are fully written and synced are they renamed
//! into place, so a failure part-way leaves neither destination touched.

use crate::error::{GateError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::io::Write;
use tempfile::NamedTempFile;

/// A destination path and the bytes it should hold.
#[derive(Debug, Clone, Copy)]
pub struct Artefact<'a> {
    /// Where the bytes end up.
    pub path: &'a Utf8Path,
    /// File contents.
    pub contents: &'a [u8],
}

struct Staged<'a> {
    path: &'a Utf8Path,
    file: NamedTempFile,
}

/// Write both artefacts, renaming them into place in order.
///
/// # Errors
///
/// Returns [`GateError::WriteFailed`] naming the destination whose temporary
/// file could not be created, written, synced or renamed.
pub fn write_pair(first: Artefact<'_>, second: Artefact<'_>) -> Result<()> {
    let first = stage(first)?;
    let second = stage(second)?;
    persist(first)?;
    persist(second)
}

fn stage(artefact: Artefact<'_>) -> Result<Staged<'_>> {
    let path = artefact.path;
    let fail = |source| GateError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };
    let mut file = tempfile::Builder::new()
        .prefix(".gate-")
        .tempfile_in(parent_dir(path))
        .map_err(fail)?;
    file.write_all(artefact.contents).map_err(fail)?;
    file.as_file().sync_all().map_err(fail)?;
    Ok(Staged { path, file })
}

fn persist(staged: Staged<'_>) -> Result<()> {
    staged
        .file
        .persist(staged.path)
        .map_err(|err| GateError::WriteFailed {
            path: staged.path.to_path_buf(),
            source: err.error,
        })?;
    debug!("wrote {}", staged.path);
    Ok(())
}

/// Directory the temporary file must live in for the rename to stay on one
/// filesystem.
fn parent_dir(path: &Utf8Path) -> Utf8PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    }
}

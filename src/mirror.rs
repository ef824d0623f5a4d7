//! Output root reset and static asset mirroring.
//!
//! Runs exactly once, before the tree walk: deletes any pre-existing output
//! root, then copies the template/assets directory into its place — CSS,
//! images, fonts, and the template file itself, exactly as they sit on
//! disk. Page generation then writes into the mirrored tree.
//!
//! The delete is what makes builds non-incremental: stale pages from a
//! previous run cannot survive.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("template directory not found: {0}")]
    TemplateDirMissing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Reset `output_root` to a copy of `template_dir`.
///
/// Returns the number of files copied.
pub fn mirror(template_dir: &Path, output_root: &Path) -> Result<usize, MirrorError> {
    if !template_dir.is_dir() {
        return Err(MirrorError::TemplateDirMissing(template_dir.to_path_buf()));
    }

    match fs::remove_dir_all(output_root) {
        Ok(()) => log::debug!("removed stale output root {}", output_root.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let mut copied = 0;
    for entry in WalkDir::new(template_dir) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(template_dir).unwrap();
        let dest = output_root.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)?;
        } else {
            fs::copy(entry.path(), &dest)?;
            copied += 1;
            log::debug!("copied {} -> {}", entry.path().display(), dest.display());
        }
    }

    Ok(copied)
}

//! File system utilities for bundling.
//!
//! Output is always written through a temporary file in the destination
//! directory and renamed into place, so a failed build never leaves a
//! truncated bundle behind.

use crate::bundler::{Result, error::ErrorExt};
use std::{
    io::{BufWriter, Write},
    path::Path,
};

/// Atomically writes the bytes produced by `write` to `path`.
///
/// Parent directories are created as needed. If `write` fails, the temporary
/// file is removed and `path` is left untouched.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).fs_context("creating output directory", parent)?;

    let temp = tempfile::NamedTempFile::new_in(parent)
        .fs_context("creating temporary output in", parent)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        write(&mut writer)?;
        writer.flush().fs_context("flushing output", temp.path())?;
    }
    temp.as_file()
        .sync_all()
        .fs_context("syncing output", temp.path())?;
    temp.persist(path)
        .map_err(|e| e.error)
        .fs_context("moving output into place at", path)?;
    Ok(())
}

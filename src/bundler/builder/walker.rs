//! Directory traversal feeding the compression workers.

use crate::bundler::{
    Error, ExcludeMatcher, Result,
    error::{Context, ErrorExt},
};
use crossbeam::channel::Sender;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A file discovered by the walker: absolute source path and relative id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkItem {
    /// Path used to open the file.
    pub path: PathBuf,
    /// `/`-joined id relative to the root it was found under.
    pub name: String,
}

/// Walks every root and pushes non-hidden, non-excluded files to `queue`.
///
/// Consumes the sender: when this returns, the queue is closed exactly once
/// and the workers drain whatever is left. Returns the number of files sent.
///
/// # Errors
///
/// Any unreadable directory or missing root aborts the walk.
pub fn walk(roots: &[PathBuf], exclude: &ExcludeMatcher, queue: Sender<WorkItem>) -> Result<usize> {
    let mut sent = 0;
    for root in roots {
        let Some(count) = walk_root(root, exclude, &queue)? else {
            log::debug!("all workers stopped, ending walk early");
            break;
        };
        sent += count;
    }
    Ok(sent)
}

/// Walks one root. `None` means the workers hung up.
fn walk_root(root: &Path, exclude: &ExcludeMatcher, queue: &Sender<WorkItem>) -> Result<Option<usize>> {
    let metadata = std::fs::metadata(root).fs_context("reading asset root", root)?;
    if !metadata.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let mut sent = 0;
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !(is_hidden(e) || is_excluded_dir(root, e, exclude)));

    for entry in walker {
        let entry = entry.map_err(|error| Error::Walk {
            root: root.to_path_buf(),
            error,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = relative_id(root, entry.path())?;
        if exclude.should_exclude(&name) {
            log::debug!("excluded {}", name);
            continue;
        }

        let item = WorkItem {
            path: entry.into_path(),
            name,
        };
        if queue.send(item).is_err() {
            return Ok(None);
        }
        sent += 1;
    }

    log::debug!("queued {} files from {}", sent, root.display());
    Ok(Some(sent))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().as_encoded_bytes().starts_with(b".")
}

fn is_excluded_dir(root: &Path, entry: &DirEntry, exclude: &ExcludeMatcher) -> bool {
    if exclude.is_empty() || !entry.file_type().is_dir() {
        return false;
    }
    match relative_id(root, entry.path()) {
        Ok(id) if exclude.excludes_subtree(&id) => {
            log::debug!("excluded directory {}", id);
            true
        }
        _ => false,
    }
}

/// Builds the `/`-joined id of `path` below `root`.
fn relative_id(root: &Path, path: &Path) -> Result<String> {
    let rel = path
        .strip_prefix(root)
        .ok()
        .context(format!("{} escaped its root", path.display()))?;

    let segments = rel
        .components()
        .map(|c| {
            c.as_os_str()
                .to_str()
                .ok_or_else(|| Error::NonUtf8Path(path.to_path_buf()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(segments.join("/"))
}

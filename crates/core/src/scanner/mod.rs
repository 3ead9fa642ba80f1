//! Directory scanning: audio file discovery and output tree mirroring.
//!
//! Both operations walk the input tree in file-name order so repeated runs
//! over the same tree visit entries identically. Directory symlinks are not
//! followed.
//! Unreadable subdirectories are logged and skipped, while problems with
//! the root itself are fatal.

mod discover;
mod error;
mod extensions;
mod mirror;

pub use discover::{discover, discover_excluding};
pub use error::ScanError;
pub use extensions::{is_recognized, RECOGNIZED_EXTENSIONS};
pub use mirror::mirror;

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Checks that `root` is a readable directory.
pub(crate) fn check_root(root: &Path) -> Result<(), ScanError> {
    let meta = std::fs::metadata(root).map_err(|e| ScanError::from_io(root, e))?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    std::fs::read_dir(root).map_err(|e| ScanError::from_io(root, e))?;
    Ok(())
}

/// Walks `root` in deterministic order, yielding readable entries.
///
/// When `exclude` names a directory inside `root`, that subtree is pruned.
pub(crate) fn walk(root: &Path, exclude: Option<&Path>) -> impl Iterator<Item = DirEntry> {
    let pruned = exclude.and_then(|e| nested_path(root, e));

    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| pruned.as_deref() != Some(e.path()))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(
                    path = ?e.path(),
                    error = %e,
                    "Skipping unreadable entry"
                );
                None
            }
        })
}

/// Expresses `other` as a path under `root` if it lives inside it.
fn nested_path(root: &Path, other: &Path) -> Option<PathBuf> {
    let root_abs = root.canonicalize().ok()?;
    let other_abs = other.canonicalize().ok()?;
    let rel = other_abs.strip_prefix(&root_abs).ok()?;
    if rel.as_os_str().is_empty() {
        return None;
    }
    Some(root.join(rel))
}

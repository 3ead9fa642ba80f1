use std::path::{Path, PathBuf};
use walkdir::DirEntry;

use super::extensions::is_recognized;
use super::{check_root, walk, ScanError};

/// Recursively lists every recognized audio file under `root`.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    discover_excluding(root, None)
}

/// Like [`discover`], but never descends into `exclude`.
///
/// Used when the output tree lives inside the input tree.
pub fn discover_excluding(root: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>, ScanError> {
    check_root(root)?;

    let files: Vec<PathBuf> = walk(root, exclude)
        .filter(|e| is_file_or_file_link(e) && is_recognized(e.path()))
        .map(|e| e.into_path())
        .collect();

    tracing::debug!(root = %root.display(), count = files.len(), "Discovered audio files");
    Ok(files)
}

/// Regular files, plus symlinks whose target is a regular file.
fn is_file_or_file_link(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    entry.path_is_symlink()
        && std::fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"data").unwrap();
    }

    #[test]
    fn test_discover_filters_by_extension() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.mp3");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "sub/b.flac");
        touch(dir.path(), "sub/cover.jpg");
        touch(dir.path(), "sub/deep/C.AAC");

        let files = discover(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![
                dir.path().join("a.mp3"),
                dir.path().join("sub/b.flac"),
                dir.path().join("sub/deep/C.AAC"),
            ]
        );
    }

    #[test]
    fn test_discover_is_sorted_per_directory() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "c.mp3");
        touch(dir.path(), "a.mp3");
        touch(dir.path(), "b.mp3");

        let names: Vec<_> = discover(dir.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.mp3", "b.mp3", "c.mp3"]);
    }

    #[test]
    fn test_discover_skips_directories_named_like_audio() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("album.flac")).unwrap();
        touch(dir.path(), "album.flac/01.flac");

        let files = discover(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("album.flac/01.flac")]);
    }

    #[test]
    fn test_discover_empty_tree() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        assert!(discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_discover_missing_root() {
        let err = discover(Path::new("/nonexistent/music")).unwrap_err();
        assert!(matches!(err, ScanError::NotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_includes_symlinked_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "real.flac");
        std::os::unix::fs::symlink(dir.path().join("real.flac"), dir.path().join("link.flac"))
            .unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing.flac"), dir.path().join("dangling.flac"))
            .unwrap();

        let files = discover(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("link.flac"), dir.path().join("real.flac")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_does_not_follow_directory_links() {
        let dir = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        touch(elsewhere.path(), "b.mp3");
        std::os::unix::fs::symlink(elsewhere.path(), dir.path().join("linked")).unwrap();

        assert!(discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_discover_excluding_output_tree() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.mp3");
        touch(dir.path(), "out/a.mp3");

        let out = dir.path().join("out");
        let files = discover_excluding(dir.path(), Some(&out)).unwrap();
        assert_eq!(files, vec![dir.path().join("a.mp3")]);
    }
}

//! Error types for the scanner module.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while walking or mirroring a directory tree.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified root does not exist.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// Root exists but is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Root cannot be read.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An output directory could not be created.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other I/O failure on a root path.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Classifies an I/O error raised on `path`.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io { path, source },
        }
    }
}

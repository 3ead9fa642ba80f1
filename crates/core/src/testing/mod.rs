//! Testing utilities and mock implementations.
//!
//! This module provides a mock converter and a recording progress sink,
//! allowing the pool and the driver to be tested without ffmpeg.
//!
//! # Example
//!
//! ```rust,ignore
//! use transmirror_core::testing::{MockConverter, RecordingProgress};
//!
//! let converter = MockConverter::new();
//! converter.set_conversion_duration(Duration::from_millis(20)).await;
//!
//! let progress = RecordingProgress::new();
//! let report = pool.run(items, &progress).await;
//! assert_eq!(progress.position(), report.total as u64);
//! ```

mod mock_converter;
mod recording_progress;

pub use mock_converter::{MockConverter, RecordedConversion};
pub use recording_progress::RecordingProgress;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::Path;

    /// Create a file (and its parent directories) under `root`.
    pub fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, b"fixture").expect("Failed to write fixture file");
    }

    /// Create a directory (and its parents) under `root`.
    pub fn mkdir(root: &Path, relative: &str) {
        std::fs::create_dir_all(root.join(relative)).expect("Failed to create directory");
    }
}

//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Encoder used for every output file.
pub const TARGET_CODEC: &str = "libmp3lame";

/// File extension of the encoded stream.
pub const TARGET_EXTENSION: &str = "mp3";

/// Default output bitrate in kbps.
pub const DEFAULT_BITRATE_KBPS: u32 = 320;

/// A single transcode request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// Input file path.
    pub input_path: PathBuf,
    /// Output file path. Overwritten if it already exists.
    pub output_path: PathBuf,
    /// Target audio bitrate in kbps.
    pub bitrate_kbps: u32,
}

impl ConversionJob {
    /// Creates a job at the default bitrate.
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            bitrate_kbps: DEFAULT_BITRATE_KBPS,
        }
    }

    /// Sets the target bitrate.
    pub fn with_bitrate(mut self, bitrate_kbps: u32) -> Self {
        self.bitrate_kbps = bitrate_kbps;
        self
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Output file path.
    pub output_path: PathBuf,
    /// Output file size in bytes.
    pub output_size_bytes: u64,
    /// Conversion duration in milliseconds.
    pub duration_ms: u64,
}

//! Converter module for transcoding audio files.
//!
//! This module provides the `Converter` trait and an implementation that
//! shells out to FFmpeg. Every job produces an MP3 stream at a fixed
//! bitrate, overwriting whatever is already at the output path.
//!
//! # Example
//!
//! ```ignore
//! use transmirror_core::converter::{FfmpegConverter, Converter, ConversionJob};
//!
//! let converter = FfmpegConverter::with_defaults();
//!
//! // Validate ffmpeg is available
//! converter.validate().await?;
//!
//! let job = ConversionJob::new("/music/album/01.flac", "/out/album/01.flac");
//! let result = converter.convert(job).await?;
//! println!("Converted in {} ms", result.duration_ms);
//! ```

mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use config::ConverterConfig;
pub use error::ConverterError;
pub use ffmpeg::FfmpegConverter;
pub use traits::Converter;
pub use types::{
    ConversionJob, ConversionResult, DEFAULT_BITRATE_KBPS, TARGET_CODEC, TARGET_EXTENSION,
};

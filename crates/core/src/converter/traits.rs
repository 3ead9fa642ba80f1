//! Trait definitions for the converter module.

use async_trait::async_trait;

use super::error::ConverterError;
use super::types::{ConversionJob, ConversionResult};

/// A converter that can transcode audio files.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Returns the name of this converter implementation.
    fn name(&self) -> &str;

    /// Converts a single file, returning once the engine has exited.
    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError>;

    /// Validates that the converter is properly configured and ready.
    async fn validate(&self) -> Result<(), ConverterError>;
}

#[async_trait]
impl<T: Converter + ?Sized> Converter for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError> {
        (**self).convert(job).await
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        (**self).validate().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    struct StaticConverter;

    #[async_trait]
    impl Converter for StaticConverter {
        fn name(&self) -> &str {
            "static"
        }

        async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError> {
            Ok(ConversionResult {
                output_path: job.output_path,
                output_size_bytes: 512,
                duration_ms: 1000,
            })
        }

        async fn validate(&self) -> Result<(), ConverterError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_converter_convert() {
        let converter = StaticConverter;
        let job = ConversionJob::new("/test/input.flac", "/test/output.flac");
        let result = converter.convert(job).await.unwrap();
        assert_eq!(result.output_path, PathBuf::from("/test/output.flac"));
    }

    #[tokio::test]
    async fn test_arc_converter_delegates() {
        let converter: Arc<dyn Converter> = Arc::new(StaticConverter);
        assert_eq!(converter.name(), "static");
        assert!(converter.validate().await.is_ok());
    }
}

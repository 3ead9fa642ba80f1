//! Mock converter for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::converter::{ConversionJob, ConversionResult, Converter, ConverterError};

/// A recorded conversion job for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedConversion {
    /// The job that was submitted.
    pub job: ConversionJob,
    /// Whether the conversion succeeded.
    pub success: bool,
}

/// Mock implementation of the Converter trait.
///
/// Provides controllable behavior for testing:
/// - Track conversion jobs (in start order) for assertions
/// - Fail specific inputs, or the next call
/// - Simulate conversion time
/// - Optionally write a placeholder output file
/// - Track how many conversions ran at once
/// - Count conversions that began after a stop signal was set
///
/// Clones share state, so a test can keep a handle after moving one into a pool.
///
/// # Example
///
/// ```rust,ignore
/// use transmirror_core::testing::MockConverter;
///
/// let converter = MockConverter::new();
/// converter.fail_input("/music/broken.flac").await;
///
/// let pool = WorkerPool::new(PoolConfig::default(), converter.clone());
/// pool.run(items, &NoopProgress).await;
///
/// assert_eq!(converter.conversion_count().await, 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockConverter {
    /// Recorded conversions.
    conversions: Arc<RwLock<Vec<RecordedConversion>>>,
    /// Inputs that always fail.
    failing_inputs: Arc<RwLock<HashSet<PathBuf>>>,
    /// If set, the next conversion will fail with this error.
    next_error: Arc<RwLock<Option<ConverterError>>>,
    /// Simulated conversion duration in milliseconds.
    conversion_duration_ms: Arc<RwLock<u64>>,
    /// Whether successful conversions write a file at the output path.
    write_outputs: Arc<RwLock<bool>>,
    /// Conversions currently running.
    active: Arc<AtomicUsize>,
    /// Highest value `active` has reached.
    peak: Arc<AtomicUsize>,
    /// Result of `validate`.
    valid: Arc<RwLock<bool>>,
    /// Stop signal checked at the start of every conversion.
    stop_probe: Arc<RwLock<Option<CancellationToken>>>,
    /// Conversions that began while `stop_probe` was cancelled.
    started_after_stop: Arc<AtomicUsize>,
}

impl Default for MockConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConverter {
    /// Create a new mock converter.
    pub fn new() -> Self {
        Self {
            conversions: Arc::new(RwLock::new(Vec::new())),
            failing_inputs: Arc::new(RwLock::new(HashSet::new())),
            next_error: Arc::new(RwLock::new(None)),
            conversion_duration_ms: Arc::new(RwLock::new(0)),
            write_outputs: Arc::new(RwLock::new(false)),
            active: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
            valid: Arc::new(RwLock::new(true)),
            stop_probe: Arc::new(RwLock::new(None)),
            started_after_stop: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get all recorded conversions, in the order they started.
    pub async fn recorded_conversions(&self) -> Vec<RecordedConversion> {
        self.conversions.read().await.clone()
    }

    /// Get the number of conversions attempted.
    pub async fn conversion_count(&self) -> usize {
        self.conversions.read().await.len()
    }

    /// Input paths that were attempted, in start order.
    pub async fn attempted_inputs(&self) -> Vec<PathBuf> {
        self.conversions
            .read()
            .await
            .iter()
            .map(|c| c.job.input_path.clone())
            .collect()
    }

    /// Make every conversion of `path` fail.
    pub async fn fail_input(&self, path: impl AsRef<Path>) {
        self.failing_inputs
            .write()
            .await
            .insert(path.as_ref().to_path_buf());
    }

    /// Configure the next conversion to fail with the given error.
    pub async fn set_next_error(&self, error: ConverterError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the simulated conversion duration.
    pub async fn set_conversion_duration(&self, duration: Duration) {
        *self.conversion_duration_ms.write().await = duration.as_millis() as u64;
    }

    /// Write a placeholder file at the output path on success.
    pub async fn set_write_outputs(&self, enabled: bool) {
        *self.write_outputs.write().await = enabled;
    }

    /// Make `validate` fail.
    pub async fn set_valid(&self, valid: bool) {
        *self.valid.write().await = valid;
    }

    /// Watch `token`; conversions starting after it is cancelled are counted.
    pub async fn set_stop_probe(&self, token: CancellationToken) {
        *self.stop_probe.write().await = Some(token);
    }

    /// Number of conversions that began after the probed stop signal was set.
    pub fn started_after_stop(&self) -> usize {
        self.started_after_stop.load(Ordering::SeqCst)
    }

    /// Highest number of conversions observed running at the same time.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    async fn take_error(&self, input: &Path) -> Option<ConverterError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Some(err);
        }
        if self.failing_inputs.read().await.contains(input) {
            return Some(ConverterError::conversion_failed(
                "FFmpeg exited with code: Some(1)",
                Some(format!("{}: Invalid data found when processing input", input.display())),
            ));
        }
        None
    }
}

#[async_trait]
impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError> {
        if let Some(token) = self.stop_probe.read().await.as_ref() {
            if token.is_cancelled() {
                self.started_after_stop.fetch_add(1, Ordering::SeqCst);
            }
        }

        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let error = self.take_error(&job.input_path).await;
        self.conversions.write().await.push(RecordedConversion {
            job: job.clone(),
            success: error.is_none(),
        });

        // Failures are immediate, like ffmpeg rejecting a bad input.
        if let Some(err) = error {
            self.active.fetch_sub(1, Ordering::SeqCst);
            return Err(err);
        }

        // Simulate conversion time
        let duration_ms = *self.conversion_duration_ms.read().await;
        if duration_ms > 0 {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        }

        let mut result = Ok(ConversionResult {
            output_path: job.output_path.clone(),
            output_size_bytes: 7,
            duration_ms,
        });
        if *self.write_outputs.read().await {
            if let Err(e) = tokio::fs::write(&job.output_path, b"ID3mock").await {
                result = Err(ConverterError::Io(e));
            }
        }

        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        if *self.valid.read().await {
            Ok(())
        } else {
            Err(ConverterError::FfmpegNotFound {
                path: PathBuf::from("ffmpeg"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_conversions() {
        let converter = MockConverter::new();
        converter
            .convert(ConversionJob::new("/in/a.mp3", "/out/a.mp3"))
            .await
            .unwrap();

        let recorded = converter.recorded_conversions().await;
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].success);
        assert_eq!(converter.peak_concurrency(), 1);
    }

    #[tokio::test]
    async fn test_failing_input() {
        let converter = MockConverter::new();
        converter.fail_input("/in/bad.flac").await;

        let err = converter
            .convert(ConversionJob::new("/in/bad.flac", "/out/bad.flac"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConverterError::ConversionFailed { .. }));
        assert!(!converter.recorded_conversions().await[0].success);
    }

    #[tokio::test]
    async fn test_next_error_is_consumed() {
        let converter = MockConverter::new();
        converter
            .set_next_error(ConverterError::conversion_failed("boom", None))
            .await;

        assert!(converter
            .convert(ConversionJob::new("/in/a.mp3", "/out/a.mp3"))
            .await
            .is_err());
        assert!(converter
            .convert(ConversionJob::new("/in/a.mp3", "/out/a.mp3"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let converter = MockConverter::new();
        let handle = converter.clone();
        converter
            .convert(ConversionJob::new("/in/a.mp3", "/out/a.mp3"))
            .await
            .unwrap();
        assert_eq!(handle.conversion_count().await, 1);
    }
}

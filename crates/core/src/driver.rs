//! End-to-end run: mirror the tree, discover files, convert them.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::{Config, OutputNaming};
use crate::converter::{Converter, TARGET_EXTENSION};
use crate::pool::{PoolReport, WorkItem, WorkerPool};
use crate::progress::ProgressSink;
use crate::scanner::{self, ScanError};

/// Errors that abort a run before any conversion starts.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Writing into the input tree would overwrite the sources.
    #[error("Input and output directories are the same: {0}")]
    SameDirectory(PathBuf),
}

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Directories recreated under the output root.
    pub directories: usize,
    /// Recognized audio files found.
    pub discovered: usize,
    pub report: PoolReport,
    pub elapsed: Duration,
}

impl RunSummary {
    /// True when every discovered file converted.
    pub fn is_clean(&self) -> bool {
        self.report.is_clean()
    }
}

/// Pairs each input file with its location under `output_root`.
///
/// Files outside `input_root` are dropped.
pub fn plan_work_items(
    input_root: &Path,
    output_root: &Path,
    files: &[PathBuf],
    naming: OutputNaming,
) -> Vec<WorkItem> {
    files
        .iter()
        .filter_map(|input| {
            let relative = input.strip_prefix(input_root).ok()?;
            let mut output = output_root.join(relative);
            if naming == OutputNaming::TargetExtension {
                output.set_extension(TARGET_EXTENSION);
            }
            Some((input.clone(), output))
        })
        .enumerate()
        .map(|(index, (input, output))| WorkItem::new(index, input, output))
        .collect()
}

/// Runs the whole mirror-and-convert sequence.
pub struct Driver<C: Converter> {
    naming: OutputNaming,
    pool: WorkerPool<C>,
}

impl<C: Converter + 'static> Driver<C> {
    pub fn new(config: &Config, converter: C) -> Self {
        let pool = WorkerPool::new(config.pool.clone(), converter)
            .with_bitrate(config.converter.bitrate_kbps);
        Self {
            naming: config.output.naming,
            pool,
        }
    }

    /// The pool's stop signal.
    pub fn stop_token(&self) -> CancellationToken {
        self.pool.stop_token()
    }

    pub async fn run(
        &self,
        input_root: &Path,
        output_root: &Path,
        progress: &dyn ProgressSink,
    ) -> Result<RunSummary, DriverError> {
        self.run_until(input_root, output_root, progress, std::future::pending::<()>())
            .await
    }

    /// Like [`Driver::run`], but stops waiting once `interrupt` resolves.
    pub async fn run_until<F>(
        &self,
        input_root: &Path,
        output_root: &Path,
        progress: &dyn ProgressSink,
        interrupt: F,
    ) -> Result<RunSummary, DriverError>
    where
        F: Future<Output = ()>,
    {
        let start = Instant::now();
        check_distinct(input_root, output_root)?;

        progress.status("Copying directory structure...");
        let directories = scanner::mirror(input_root, output_root)?;

        let files = scanner::discover_excluding(input_root, Some(output_root))?;
        let items = plan_work_items(input_root, output_root, &files, self.naming);
        info!(
            input = %input_root.display(),
            output = %output_root.display(),
            directories,
            files = items.len(),
            "Planned conversion"
        );

        progress.status(&format!(
            "Converting files... Number of workers: {}",
            self.pool.config().concurrency
        ));
        let report = self.pool.run_until(items, progress, interrupt).await;

        Ok(RunSummary {
            directories,
            discovered: files.len(),
            report,
            elapsed: start.elapsed(),
        })
    }
}

fn check_distinct(input_root: &Path, output_root: &Path) -> Result<(), DriverError> {
    let input = input_root
        .canonicalize()
        .map_err(|e| ScanError::from_io(input_root, e))?;
    match output_root.canonicalize() {
        Ok(output) if output == input => Err(DriverError::SameDirectory(input)),
        _ => Ok(()),
    }
}

//! Worker pool implementation.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::converter::{ConversionJob, Converter, DEFAULT_BITRATE_KBPS};
use crate::progress::ProgressSink;

use super::config::PoolConfig;
use super::types::{ItemFailure, ItemOutcome, PoolReport, WorkItem};

/// Messages from workers to the aggregator.
#[derive(Debug)]
enum WorkerEvent {
    Started(WorkItem),
    Finished(WorkItem, ItemOutcome),
}

type SharedQueue = Arc<Mutex<mpsc::Receiver<WorkItem>>>;

/// A fixed-size pool of conversion workers sharing one stop signal.
///
/// Items are fed in order into a bounded queue. Each worker pulls an item,
/// checks the stop signal, and either converts it or reports it skipped.
/// The first failed conversion sets the stop signal; conversions already
/// running are left to finish.
pub struct WorkerPool<C: Converter> {
    config: PoolConfig,
    converter: Arc<C>,
    bitrate_kbps: u32,
    stop: CancellationToken,
}

impl<C: Converter + 'static> WorkerPool<C> {
    /// Creates a new worker pool.
    pub fn new(config: PoolConfig, converter: C) -> Self {
        Self {
            config,
            converter: Arc::new(converter),
            bitrate_kbps: DEFAULT_BITRATE_KBPS,
            stop: CancellationToken::new(),
        }
    }

    /// Sets the bitrate requested for every item.
    pub fn with_bitrate(mut self, bitrate_kbps: u32) -> Self {
        self.bitrate_kbps = bitrate_kbps;
        self
    }

    /// The pool's stop signal. Cancelling it prevents further items from starting.
    pub fn stop_token(&self) -> CancellationToken {
        self.stop.clone()
    }

    /// Whether the stop signal has been set.
    pub fn is_stopped(&self) -> bool {
        self.stop.is_cancelled()
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Runs every item to completion (or skip).
    pub async fn run(&self, items: Vec<WorkItem>, progress: &dyn ProgressSink) -> PoolReport {
        self.run_until(items, progress, std::future::pending::<()>())
            .await
    }

    /// Runs items until they are all accounted for or `interrupt` resolves.
    ///
    /// On interrupt the stop signal is set and the call returns at once.
    /// Items whose conversion had started go to `in_flight` and are not
    /// killed. Items that never started are reported as skipped.
    pub async fn run_until<F>(
        &self,
        items: Vec<WorkItem>,
        progress: &dyn ProgressSink,
        interrupt: F,
    ) -> PoolReport
    where
        F: Future<Output = ()>,
    {
        let total = items.len();
        let mut report = PoolReport::new(total);
        progress.start(total as u64);

        if items.is_empty() {
            progress.finish();
            return report;
        }

        let workers = self.config.concurrency.clamp(1, total);
        info!(items = total, workers, "Starting worker pool");

        let mut pending: BTreeMap<usize, WorkItem> =
            items.iter().map(|i| (i.index, i.clone())).collect();
        let mut running: BTreeSet<usize> = BTreeSet::new();

        let (queue_tx, queue_rx) = mpsc::channel::<WorkItem>(workers);
        let queue: SharedQueue = Arc::new(Mutex::new(queue_rx));
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<WorkerEvent>();

        let mut tasks = JoinSet::new();

        tasks.spawn(async move {
            for item in items {
                if queue_tx.send(item).await.is_err() {
                    break;
                }
            }
        });

        for worker_id in 0..workers {
            tasks.spawn(worker_loop(
                worker_id,
                Arc::clone(&self.converter),
                self.bitrate_kbps,
                Arc::clone(&queue),
                event_tx.clone(),
                self.stop.clone(),
            ));
        }
        drop(event_tx);
        drop(queue);

        tokio::pin!(interrupt);

        loop {
            tokio::select! {
                event = event_rx.recv() => match event {
                    Some(WorkerEvent::Started(item)) => {
                        running.insert(item.index);
                        progress.item_started(&item);
                    }
                    Some(WorkerEvent::Finished(item, outcome)) => {
                        running.remove(&item.index);
                        pending.remove(&item.index);
                        self.record(&mut report, item, outcome, progress);
                    }
                    None => break,
                },
                _ = &mut interrupt => {
                    warn!(remaining = pending.len(), "Interrupted; abandoning remaining items");
                    self.stop.cancel();
                    report.interrupted = true;
                    break;
                }
            }
        }

        if report.interrupted {
            tasks.detach_all();
        } else {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!(error = %e, "Worker task failed");
                }
            }
        }

        // Anything still pending was never reported: interrupted, or its worker died.
        for (index, item) in pending {
            if running.contains(&index) {
                report.in_flight.push(item);
            } else {
                report.skipped.push(item);
            }
        }
        report.sort();
        progress.finish();

        info!(
            converted = report.converted.len(),
            failed = report.failures.len(),
            skipped = report.skipped.len(),
            in_flight = report.in_flight.len(),
            interrupted = report.interrupted,
            "Worker pool finished"
        );
        report
    }

    fn record(
        &self,
        report: &mut PoolReport,
        item: WorkItem,
        outcome: ItemOutcome,
        progress: &dyn ProgressSink,
    ) {
        match outcome {
            ItemOutcome::Converted(_) => {
                report.converted.push(item);
                progress.increment(1);
            }
            ItemOutcome::Failed(error) => {
                report.failures.push(ItemFailure { item, error });
                progress.increment(1);
            }
            ItemOutcome::Skipped => {
                report.skipped.push(item);
                if self.config.count_skipped_as_progress {
                    progress.increment(1);
                }
            }
        }
    }
}

async fn worker_loop<C: Converter>(
    worker_id: usize,
    converter: Arc<C>,
    bitrate_kbps: u32,
    queue: SharedQueue,
    events: mpsc::UnboundedSender<WorkerEvent>,
    stop: CancellationToken,
) {
    loop {
        let next = queue.lock().await.recv().await;
        let Some(item) = next else {
            break;
        };

        if stop.is_cancelled() {
            debug!(worker_id, input = %item.input_path.display(), "Stop signal set, skipping");
            if events.send(WorkerEvent::Finished(item, ItemOutcome::Skipped)).is_err() {
                break;
            }
            continue;
        }

        let _ = events.send(WorkerEvent::Started(item.clone()));

        let job = ConversionJob::new(item.input_path.clone(), item.output_path.clone())
            .with_bitrate(bitrate_kbps);

        let outcome = match converter.convert(job).await {
            Ok(result) => {
                debug!(
                    worker_id,
                    input = %item.input_path.display(),
                    duration_ms = result.duration_ms,
                    "Converted"
                );
                ItemOutcome::Converted(result)
            }
            Err(e) => {
                let diagnostic = e.diagnostic();
                error!(
                    worker_id,
                    input = %item.input_path.display(),
                    error = %diagnostic,
                    "Failed to convert; stopping remaining work"
                );
                stop.cancel();
                ItemOutcome::Failed(diagnostic)
            }
        };

        if events.send(WorkerEvent::Finished(item, outcome)).is_err() {
            break;
        }
    }
}

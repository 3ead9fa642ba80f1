//! Progress reporting hooks for a conversion run.

use crate::pool::WorkItem;

/// Receives progress notifications from the driver and the worker pool.
///
/// Implementations must be cheap: calls arrive on the aggregator loop
/// between completions.
pub trait ProgressSink: Send + Sync {
    /// A human-readable status line ("Copying directory structure...").
    fn status(&self, _message: &str) {}

    /// Total number of units the run will report.
    fn start(&self, total: u64);

    /// A worker has begun converting `item`.
    fn item_started(&self, _item: &WorkItem) {}

    /// `delta` more units are done.
    fn increment(&self, delta: u64);

    /// No more updates will follow.
    fn finish(&self) {}
}

/// A sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn start(&self, _total: u64) {}

    fn increment(&self, _delta: u64) {}
}

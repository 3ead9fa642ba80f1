//! Progress sink that records every call.

use std::sync::Mutex;

use crate::pool::WorkItem;
use crate::progress::ProgressSink;

#[derive(Debug, Default)]
struct Recorded {
    statuses: Vec<String>,
    total: Option<u64>,
    position: u64,
    started: Vec<WorkItem>,
    finished: bool,
}

/// A [`ProgressSink`] that keeps what it was told, for assertions.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    inner: Mutex<Recorded>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status lines, in order.
    pub fn statuses(&self) -> Vec<String> {
        self.lock().statuses.clone()
    }

    /// Total announced by `start`.
    pub fn total(&self) -> Option<u64> {
        self.lock().total
    }

    /// Sum of all increments.
    pub fn position(&self) -> u64 {
        self.lock().position
    }

    /// Items reported as started, in order.
    pub fn started(&self) -> Vec<WorkItem> {
        self.lock().started.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.lock().finished
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Recorded> {
        // A poisoned lock only means another assertion already panicked.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProgressSink for RecordingProgress {
    fn status(&self, message: &str) {
        self.lock().statuses.push(message.to_string());
    }

    fn start(&self, total: u64) {
        self.lock().total = Some(total);
    }

    fn item_started(&self, item: &WorkItem) {
        self.lock().started.push(item.clone());
    }

    fn increment(&self, delta: u64) {
        self.lock().position += delta;
    }

    fn finish(&self) {
        self.lock().finished = true;
    }
}

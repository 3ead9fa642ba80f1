//! Types for the worker pool.

use std::path::PathBuf;

use crate::converter::ConversionResult;

/// One file to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Position in submission order.
    pub index: usize,
    /// Source file.
    pub input_path: PathBuf,
    /// Destination file.
    pub output_path: PathBuf,
}

impl WorkItem {
    pub fn new(index: usize, input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }
}

/// What happened to a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The engine produced the output file.
    Converted(ConversionResult),
    /// The engine failed; carries its diagnostic.
    Failed(String),
    /// The stop signal was set before the item started.
    Skipped,
}

/// A failed item with the engine's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub item: WorkItem,
    pub error: String,
}

/// Aggregated outcome of a pool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolReport {
    /// Number of items submitted.
    pub total: usize,
    /// Items converted successfully.
    pub converted: Vec<WorkItem>,
    /// Items whose conversion failed.
    pub failures: Vec<ItemFailure>,
    /// Items never attempted.
    pub skipped: Vec<WorkItem>,
    /// Items whose conversion was still running when an interrupt ended the run.
    pub in_flight: Vec<WorkItem>,
    /// Whether the run was cut short by an interrupt.
    pub interrupted: bool,
}

impl PoolReport {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// True when every item converted and the run was not interrupted.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
            && self.skipped.is_empty()
            && self.in_flight.is_empty()
            && !self.interrupted
    }

    /// Number of items with a recorded outcome.
    pub fn accounted(&self) -> usize {
        self.converted.len() + self.failures.len() + self.skipped.len() + self.in_flight.len()
    }

    /// Sorts every list back into submission order.
    pub(crate) fn sort(&mut self) {
        self.converted.sort_by_key(|i| i.index);
        self.failures.sort_by_key(|f| f.item.index);
        self.skipped.sort_by_key(|i| i.index);
        self.in_flight.sort_by_key(|i| i.index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_clean() {
        let report = PoolReport::new(0);
        assert!(report.is_clean());
        assert_eq!(report.accounted(), 0);
    }

    #[test]
    fn test_report_with_skips_is_not_clean() {
        let mut report = PoolReport::new(2);
        report.converted.push(WorkItem::new(0, "/in/a.mp3", "/out/a.mp3"));
        report.skipped.push(WorkItem::new(1, "/in/b.mp3", "/out/b.mp3"));
        assert!(!report.is_clean());
        assert_eq!(report.accounted(), 2);
    }

    #[test]
    fn test_in_flight_items_are_accounted() {
        let mut report = PoolReport::new(2);
        report.skipped.push(WorkItem::new(1, "/in/b.mp3", "/out/b.mp3"));
        report.in_flight.push(WorkItem::new(0, "/in/a.mp3", "/out/a.mp3"));
        assert!(!report.is_clean());
        assert_eq!(report.accounted(), 2);
    }

    #[test]
    fn test_sort_restores_submission_order() {
        let mut report = PoolReport::new(3);
        report.converted.push(WorkItem::new(2, "/in/c", "/out/c"));
        report.converted.push(WorkItem::new(0, "/in/a", "/out/a"));
        report.sort();
        assert_eq!(report.converted[0].index, 0);
        assert_eq!(report.converted[1].index, 2);
    }
}

//! Worker pool for converting many files concurrently.
//!
//! This module provides the `WorkerPool`, which runs a fixed number of
//! conversion workers over a bounded queue of `WorkItem`s:
//! - Items are queued in submission order; completion order is free
//! - Each outcome goes to a single aggregator that drives progress
//! - The first failure sets a shared stop signal so no new item starts
//!
//! # Example
//!
//! ```ignore
//! use transmirror_core::pool::{PoolConfig, WorkerPool, WorkItem};
//! use transmirror_core::converter::FfmpegConverter;
//!
//! let pool = WorkerPool::new(PoolConfig::default(), FfmpegConverter::with_defaults());
//! let report = pool.run(items, &progress).await;
//!
//! for failure in &report.failures {
//!     eprintln!("{}: {}", failure.item.input_path.display(), failure.error);
//! }
//! ```

mod config;
mod runner;
mod types;

pub use config::PoolConfig;
pub use runner::WorkerPool;
pub use types::{ItemFailure, ItemOutcome, PoolReport, WorkItem};

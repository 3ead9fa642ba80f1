pub mod config;
pub mod converter;
pub mod driver;
pub mod pool;
pub mod progress;
pub mod scanner;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ExitConfig,
    OutputConfig, OutputNaming,
};
pub use converter::{
    ConversionJob, ConversionResult, Converter, ConverterConfig, ConverterError, FfmpegConverter,
};
pub use driver::{plan_work_items, Driver, DriverError, RunSummary};
pub use pool::{ItemFailure, ItemOutcome, PoolConfig, PoolReport, WorkItem, WorkerPool};
pub use progress::{NoopProgress, ProgressSink};
pub use scanner::{discover, mirror, ScanError, RECOGNIZED_EXTENSIONS};

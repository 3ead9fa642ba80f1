mod progress;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transmirror_core::{
    load_config, validate_config, Config, Converter, Driver, FfmpegConverter, RunSummary,
};

use progress::BarProgress;

/// Mirror a music library, re-encoding every audio file to MP3.
#[derive(Parser, Debug)]
#[command(name = "transmirror")]
#[command(version)]
struct Args {
    /// Root of the library to convert
    input_dir: PathBuf,

    /// Where the mirrored tree is written
    output_dir: PathBuf,

    /// TOML configuration file
    #[arg(short, long, env = "TRANSMIRROR_CONFIG")]
    config: Option<PathBuf>,

    /// Number of concurrent conversions (overrides pool.concurrency)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Suppress the progress bar, status lines and per-file notices
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<i32> {
    // Logs go to stderr so they don't tear the progress bar on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = resolve_config(&args)?;

    let converter = FfmpegConverter::new(config.converter.clone());
    converter
        .validate()
        .await
        .context("ffmpeg is not usable")?;

    let progress = if args.quiet {
        BarProgress::quiet()
    } else {
        BarProgress::new()
    };

    let driver = Driver::new(&config, converter);
    let summary = driver
        .run_until(&args.input_dir, &args.output_dir, &progress, shutdown_signal())
        .await
        .with_context(|| {
            format!(
                "Failed to convert {} into {}",
                args.input_dir.display(),
                args.output_dir.display()
            )
        })?;

    print_summary(&summary);
    Ok(exit_code(&summary, &config))
}

fn resolve_config(args: &Args) -> Result<Config> {
    if let Some(ref path) = args.config {
        info!("Loading configuration from {:?}", path);
    }
    let mut config = load_config(args.config.as_deref())
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    if let Some(jobs) = args.jobs {
        if jobs == 0 {
            bail!("--jobs must be at least 1");
        }
        config.pool.concurrency = jobs;
    }

    validate_config(&config).context("Invalid configuration")?;
    Ok(config)
}

fn print_summary(summary: &RunSummary) {
    let report = &summary.report;
    if report.interrupted {
        println!("Interrupted.");
    }
    println!(
        "Done in {:.1}s: {} converted, {} failed, {} skipped, {} still running (of {} files).",
        summary.elapsed.as_secs_f64(),
        report.converted.len(),
        report.failures.len(),
        report.skipped.len(),
        report.in_flight.len(),
        report.total
    );
    for failure in &report.failures {
        println!("  failed: {}: {}", failure.item.input_path.display(), failure.error);
    }
    for item in &report.in_flight {
        println!("  still running: {}", item.input_path.display());
    }
    for item in &report.skipped {
        println!("  skipped: {}", item.input_path.display());
    }
}

fn exit_code(summary: &RunSummary, config: &Config) -> i32 {
    if !summary.is_clean() && config.exit.fail_on_item_errors {
        1
    } else {
        0
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    warn!("Interrupt received, stopping");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use transmirror_core::{PoolReport, WorkItem};

    fn summary(report: PoolReport) -> RunSummary {
        RunSummary {
            directories: 1,
            discovered: report.total,
            report,
            elapsed: Duration::from_millis(10),
        }
    }

    fn failed_report() -> PoolReport {
        PoolReport {
            total: 2,
            converted: vec![WorkItem::new(0, "/in/a.mp3", "/out/a.mp3")],
            skipped: vec![WorkItem::new(1, "/in/b.mp3", "/out/b.mp3")],
            ..Default::default()
        }
    }

    #[test]
    fn test_args_parse_positional_and_jobs() {
        let args = Args::try_parse_from(["transmirror", "/music", "/mp3", "--jobs", "3"]).unwrap();
        assert_eq!(args.input_dir, PathBuf::from("/music"));
        assert_eq!(args.output_dir, PathBuf::from("/mp3"));
        assert_eq!(args.jobs, Some(3));
        assert!(!args.quiet);
    }

    #[test]
    fn test_args_require_both_directories() {
        assert!(Args::try_parse_from(["transmirror", "/music"]).is_err());
    }

    #[test]
    fn test_jobs_override_concurrency() {
        let args = Args::try_parse_from(["transmirror", "/a", "/b", "-j", "2"]).unwrap();
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.pool.concurrency, 2);
    }

    #[test]
    fn test_zero_jobs_rejected() {
        let args = Args::try_parse_from(["transmirror", "/a", "/b", "-j", "0"]).unwrap();
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let args =
            Args::try_parse_from(["transmirror", "/a", "/b", "-c", "/nonexistent/cfg.toml"])
                .unwrap();
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn test_config_file_is_applied() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"[converter]\nbitrate_kbps = 128\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let args = Args::try_parse_from(["transmirror", "/a", "/b", "-c", &path]).unwrap();

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.converter.bitrate_kbps, 128);
    }

    #[test]
    fn test_exit_code_clean_run() {
        let report = PoolReport {
            total: 1,
            converted: vec![WorkItem::new(0, "/in/a.mp3", "/out/a.mp3")],
            ..Default::default()
        };
        assert_eq!(exit_code(&summary(report), &Config::default()), 0);
    }

    #[test]
    fn test_exit_code_with_item_errors() {
        assert_eq!(exit_code(&summary(failed_report()), &Config::default()), 1);
    }

    #[test]
    fn test_exit_code_when_errors_tolerated() {
        let mut config = Config::default();
        config.exit.fail_on_item_errors = false;
        assert_eq!(exit_code(&summary(failed_report()), &config), 0);
    }
}

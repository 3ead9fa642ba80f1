//! Terminal progress bar backed by indicatif.

use std::io::Write;
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use transmirror_core::{ProgressSink, WorkItem};

const TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})";

type LineWriter = Box<dyn Write + Send>;

/// Draws a bar on stdout, with status and per-file lines printed above it.
///
/// indicatif hides the bar when stdout is not a terminal; the text lines
/// are still written in that case.
pub struct BarProgress {
    bar: ProgressBar,
    quiet: bool,
    lines: Mutex<LineWriter>,
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stdout());
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self::with_output(bar, false, Box::new(std::io::stdout()))
    }

    /// No bar and no status or per-file lines, for `--quiet` runs.
    pub fn quiet() -> Self {
        Self::with_output(ProgressBar::hidden(), true, Box::new(std::io::sink()))
    }

    fn with_output(bar: ProgressBar, quiet: bool, lines: LineWriter) -> Self {
        Self {
            bar,
            quiet,
            lines: Mutex::new(lines),
        }
    }

    fn line(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.bar.suspend(|| {
            let mut out = self.lines.lock().unwrap_or_else(|e| e.into_inner());
            let _ = writeln!(out, "{}", message);
            let _ = out.flush();
        });
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for BarProgress {
    fn status(&self, message: &str) {
        self.line(message);
    }

    fn start(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
    }

    fn item_started(&self, item: &WorkItem) {
        self.line(&format!(
            "Converting {} to {}...",
            item.input_path.display(),
            item.output_path.display()
        ));
    }

    fn increment(&self, delta: u64) {
        self.bar.inc(delta);
    }

    fn finish(&self) {
        self.bar.finish();
    }
}

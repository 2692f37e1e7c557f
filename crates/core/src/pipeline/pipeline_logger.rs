use std::collections::HashMap;
use std::io::{self, Write};
use std::time::Instant;

/// Cross-cutting logger for pipeline orchestration events.
///
/// Decouples the use case from the console so that the CLI can print
/// tagged progress lines while tests observe (or ignore) the same events.
pub trait PipelineLogger: Send {
    /// Report frame-level progress.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named pipeline stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    fn debug(&mut self, message: &str);

    fn info(&mut self, message: &str);

    fn warn(&mut self, message: &str);

    /// A recovered failure: reported, then the run continues.
    fn error(&mut self, message: &str);

    /// Announce a long-running step.
    fn loading(&mut self, message: &str);

    /// Echo one line that was written to the kill log.
    fn logged(&mut self, line: &str);

    /// Emit an end-of-pipeline summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn debug(&mut self, _message: &str) {}
    fn info(&mut self, _message: &str) {}
    fn warn(&mut self, _message: &str) {}
    fn error(&mut self, _message: &str) {}
    fn loading(&mut self, _message: &str) {}
    fn logged(&mut self, _line: &str) {}
}

/// Console logger that prints `[TAG] message` lines to stdout and keeps
/// per-stage timings for a summary report at the end of the run.
///
/// `[DEBUG]` lines are suppressed when `verbose` is off; everything is
/// also forwarded to the `log` facade.
pub struct StdoutPipelineLogger {
    verbose: bool,
    out: Box<dyn Write + Send>,
    timings: HashMap<String, Vec<f64>>,
    start_time: Instant,
    total_frames: usize,
}

impl StdoutPipelineLogger {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            out: Box::new(io::stdout()),
            timings: HashMap::new(),
            start_time: Instant::now(),
            total_frames: 0,
        }
    }

    /// Sends tagged lines to `out` instead of stdout.
    pub fn with_writer(mut self, out: Box<dyn Write + Send>) -> Self {
        self.out = out;
        self
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.total_frames;
        let mut lines = Vec::new();

        lines.push(format!(
            "Pipeline summary ({frames} frames, {:.1}s total):",
            elapsed_ms / 1000.0
        ));

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = if durations.is_empty() {
                0.0
            } else {
                total_ms / durations.len() as f64
            };
            let pct = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "  {stage:12}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms  ({pct:4.1}%)"
            ));
        }

        Some(lines.join("\n"))
    }

    /// Returns the timing data for a given stage.
    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    fn emit(&mut self, tag: &str, message: &str) {
        let _ = writeln!(self.out, "[{tag}] {message}");
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_frames = total;
        log::trace!("Processing frame {current}/{total}");
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn debug(&mut self, message: &str) {
        log::debug!("{message}");
        if self.verbose {
            self.emit("DEBUG", message);
        }
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
        self.emit("INFO", message);
    }

    fn warn(&mut self, message: &str) {
        log::warn!("{message}");
        self.emit("WARN", message);
    }

    fn error(&mut self, message: &str) {
        log::error!("{message}");
        self.emit("ERROR", message);
    }

    fn loading(&mut self, message: &str) {
        log::info!("{message}");
        self.emit("LOADING", &format!("{message}... Please wait."));
    }

    fn logged(&mut self, line: &str) {
        log::info!("Logged: {line}");
        self.emit("LOGGED", line);
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            println!("\n{text}");
        }
    }
}

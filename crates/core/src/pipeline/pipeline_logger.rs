use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for per-frame visualization events.
///
/// Keeps the use case independent of where progress ends up (log crate,
/// a GUI status line, nowhere).
pub trait PipelineLogger: Send {
    /// Report that frame `current` (1-based) finished; `total` when known.
    fn progress(&mut self, current: usize, total: Option<usize>);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. overlay count).
    fn metric(&mut self, name: &str, value: f64);

    /// Publish the latest memory usage line.
    fn memory(&mut self, text: &str);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: Option<usize>) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn memory(&mut self, _text: &str) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI logger: throttled progress with the latest memory line, per-stage
/// timings, metrics, and a summary at the end of the run.
pub struct StdoutPipelineLogger {
    throttle_frames: usize,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    frames: usize,
    last_memory: Option<String>,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            frames: 0,
            last_memory: None,
        }
    }

    /// Returns the formatted summary, or `None` if no frame was processed.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Overlay summary ({} frames, {:.1}s total):",
            self.frames,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            lines.push(format!(
                "  {stage:10}: avg {:6.2}ms  total {total_ms:7.1}ms",
                average(durations)
            ));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            let values = &self.metrics[name];
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            lines.push(format!("  {name}: avg {:.1}  max {max:.0}", average(values)));
        }

        if let Some(memory) = &self.last_memory {
            lines.push(format!("  {memory}"));
        }

        if elapsed_ms > 0.0 {
            let fps = self.frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }

    pub fn last_memory(&self) -> Option<&str> {
        self.last_memory.as_deref()
    }
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(30)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: Option<usize>) {
        self.frames = self.frames.max(current);
        let last = total.is_some_and(|t| t == current);
        if current % self.throttle_frames != 0 && !last {
            return;
        }
        let memory = self.last_memory.as_deref().unwrap_or("");
        match total {
            Some(t) if t > 0 => {
                let pct = current as f64 / t as f64 * 100.0;
                log::info!("Frame {current}/{t} ({pct:.1}%) {memory}");
            }
            _ => log::info!("Frame {current} {memory}"),
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn memory(&mut self, text: &str) {
        log::debug!("{text}");
        self.last_memory = Some(text.to_string());
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

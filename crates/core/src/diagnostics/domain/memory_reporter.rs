use crate::diagnostics::domain::memory_probe::MemoryProbe;
use crate::shared::constants::{BYTES_PER_MEBIBYTE, MEMORY_TEXT_PREFIX};

/// Formats a byte count as the memory usage line shown next to the preview.
///
/// Whole mebibytes only; the remainder is truncated.
pub fn format_memory_usage(bytes: u64) -> String {
    format!("{MEMORY_TEXT_PREFIX} {} MB", bytes / BYTES_PER_MEBIBYTE)
}

/// Refreshes the memory usage text once per frame.
pub struct MemoryReporter<P: MemoryProbe> {
    probe: P,
    text: String,
}

impl<P: MemoryProbe> MemoryReporter<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            text: String::new(),
        }
    }

    /// Samples the probe and returns the updated text. If the probe has no
    /// reading, the previous text is kept.
    pub fn report(&mut self) -> &str {
        match self.probe.total_allocated_bytes() {
            Some(bytes) => self.text = format_memory_usage(bytes),
            None => log::debug!("Memory probe unavailable, keeping previous reading"),
        }
        &self.text
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

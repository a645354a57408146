pub mod fallback_memory_probe;
pub mod memory_probe;
pub mod memory_reporter;

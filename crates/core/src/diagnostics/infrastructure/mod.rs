pub mod sysinfo_memory_probe;
pub mod tracking_allocator;

/// Reads the process's current total allocated memory.
pub trait MemoryProbe {
    /// Live allocated bytes, or `None` if the measurement is unavailable.
    fn total_allocated_bytes(&self) -> Option<u64>;
}

use crate::diagnostics::domain::memory_probe::MemoryProbe;

/// Reads `primary`, and `fallback` only when `primary` has no reading.
pub struct FallbackMemoryProbe<A: MemoryProbe, B: MemoryProbe> {
    primary: A,
    fallback: B,
}

impl<A: MemoryProbe, B: MemoryProbe> FallbackMemoryProbe<A, B> {
    pub fn new(primary: A, fallback: B) -> Self {
        Self { primary, fallback }
    }
}

impl<A: MemoryProbe, B: MemoryProbe> MemoryProbe for FallbackMemoryProbe<A, B> {
    fn total_allocated_bytes(&self) -> Option<u64> {
        self.primary
            .total_allocated_bytes()
            .or_else(|| self.fallback.total_allocated_bytes())
    }
}

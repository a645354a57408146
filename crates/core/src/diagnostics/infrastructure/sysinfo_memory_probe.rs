use std::sync::Mutex;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};

use crate::diagnostics::domain::memory_probe::MemoryProbe;

/// [`MemoryProbe`] that reads a process's resident memory from the OS.
///
/// Resident memory includes code, stacks and allocator slack, so readings
/// run higher than a [`TrackingAllocator`] count. Use it when no tracking
/// allocator is installed.
///
/// [`TrackingAllocator`]: super::tracking_allocator::TrackingAllocator
pub struct SysinfoMemoryProbe {
    system: Mutex<System>,
    pid: Pid,
}

impl SysinfoMemoryProbe {
    /// Probe for the current process.
    pub fn current() -> Result<Self, Box<dyn std::error::Error>> {
        let pid = sysinfo::get_current_pid()?;
        Ok(Self::for_pid(pid))
    }

    pub fn for_pid(pid: Pid) -> Self {
        let system = System::new_with_specifics(
            RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing()),
        );
        Self {
            system: Mutex::new(system),
            pid,
        }
    }
}

impl MemoryProbe for SysinfoMemoryProbe {
    fn total_allocated_bytes(&self) -> Option<u64> {
        let Ok(mut system) = self.system.lock() else {
            log::debug!("Memory probe lock poisoned");
            return None;
        };
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[self.pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        system.process(self.pid).map(|p| p.memory())
    }
}

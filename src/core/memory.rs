// thumbnailer/src/core/memory.rs
use sysinfo::{Pid, ProcessExt, ProcessRefreshKind, System, SystemExt};

/// Tracks the highest resident set size seen for this process.
pub struct MemoryProbe {
    system: System,
    pid: Option<Pid>,
    peak: u64,
}

impl MemoryProbe {
    pub fn new() -> Self {
        let pid = sysinfo::get_current_pid()
            .map_err(|e| log::debug!("Memory sampling unavailable: {}", e))
            .ok();

        let mut probe = Self {
            system: System::new(),
            pid,
            peak: 0,
        };
        probe.sample();
        probe
    }

    /// Refreshes the process entry and returns the current resident bytes.
    pub fn sample(&mut self) -> u64 {
        let Some(pid) = self.pid else {
            return 0;
        };

        self.system.refresh_process_specifics(pid, ProcessRefreshKind::new());
        let current = self
            .system
            .process(pid)
            .map(|process| process.memory())
            .unwrap_or(0);

        self.peak = self.peak.max(current);
        current
    }

    pub fn peak(&self) -> u64 {
        self.peak
    }
}

impl Default for MemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub phase_time: Duration,
    pub elapsed_time: Duration,
}

/// Samples process CPU and memory between layout phases (read, build, write).
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    state: Option<Mutex<MonitorState>>,
    start_time: Instant,
}

#[cfg(feature = "cli")]
struct MonitorState {
    system: System,
    pid: Pid,
    peak_memory_mb: u64,
    last_mark: Instant,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let start_time = Instant::now();
        let state = if enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => {
                    let mut system = System::new_with_specifics(RefreshKind::everything());
                    system.refresh_all();
                    Some(Mutex::new(MonitorState {
                        system,
                        pid,
                        peak_memory_mb: 0,
                        last_mark: start_time,
                    }))
                }
                Err(e) => {
                    tracing::warn!("System monitoring unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self { state, start_time }
    }

    /// Closes the current phase and returns its stats.
    pub fn mark(&self, phase: &str) -> Option<PhaseStats> {
        let mut state = self.state.as_ref()?.lock().ok()?;
        state.system.refresh_all();

        let pid = state.pid;
        let (cpu_usage, memory_mb) = {
            let process = state.system.process(pid)?;
            (process.cpu_usage(), process.memory() / 1024 / 1024)
        };
        state.peak_memory_mb = state.peak_memory_mb.max(memory_mb);

        let now = Instant::now();
        let phase_time = now.duration_since(state.last_mark);
        state.last_mark = now;

        Some(PhaseStats {
            phase: phase.to_string(),
            cpu_usage,
            memory_usage_mb: memory_mb,
            peak_memory_mb: state.peak_memory_mb,
            phase_time,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_phase(&self, phase: &str) {
        if let Some(stats) = self.mark(phase) {
            tracing::info!(
                "{} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Phase: {:?}, Total: {:?}",
                stats.phase,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.peak_memory_mb,
                stats.phase_time,
                stats.elapsed_time
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// No-op stand-in when built without the cli feature.
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_phase(&self, _phase: &str) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_reports_nothing() {
        let monitor = SystemMonitor::new(false);
        assert!(!monitor.is_enabled());
        assert!(monitor.mark("read").is_none());
    }
}

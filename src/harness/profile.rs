//! Machine profile: the fixed constants of a benchmarking session
//!
//! A profile groups what the call site would otherwise hard-code: the machine
//! label, the thread range, the trial duration, the memory workload sizes and
//! where results and logs are written.

use std::path::PathBuf;
use std::time::Duration;

use super::invocation::Workload;
use super::sweep::SweepConfig;

/// Session-wide benchmark constants
///
/// # Example
///
/// ```rust
/// use sweep_rs::harness::MachineProfile;
///
/// let profile = MachineProfile::default();
/// let cpu = profile.cpu_sweep();
/// assert_eq!(cpu.threads.len(), 12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MachineProfile {
    /// Machine label used in titles and file names (default: "Machine 1")
    pub name: String,

    /// Sweep covers `1..=max_threads` (default: 12)
    pub max_threads: u32,

    /// Duration of each trial (default: 60 s)
    pub trial_duration: Duration,

    /// Memory workload block size (default: "1M")
    pub memory_block_size: String,

    /// Memory workload total size (default: "24G")
    pub memory_total_size: String,

    /// Directory for plots, tables and the log (default: "Machine1")
    pub output_dir: PathBuf,

    /// Log file name inside `output_dir` (default: "benchmark_machine1_plot.log")
    pub log_file: String,
}

impl Default for MachineProfile {
    fn default() -> Self {
        Self {
            name: "Machine 1".to_string(),
            max_threads: 12,
            trial_duration: Duration::from_secs(60),
            memory_block_size: "1M".to_string(),
            memory_total_size: "24G".to_string(),
            output_dir: PathBuf::from("Machine1"),
            log_file: "benchmark_machine1_plot.log".to_string(),
        }
    }
}

impl MachineProfile {
    /// Builder pattern: machine label
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder pattern: highest thread count
    pub fn max_threads(mut self, max_threads: u32) -> Self {
        self.max_threads = max_threads;
        self
    }

    /// Builder pattern: trial duration
    pub fn trial_duration(mut self, duration: Duration) -> Self {
        self.trial_duration = duration;
        self
    }

    /// Builder pattern: memory block and total sizes
    pub fn memory_sizes(mut self, block: impl Into<String>, total: impl Into<String>) -> Self {
        self.memory_block_size = block.into();
        self.memory_total_size = total.into();
        self
    }

    /// Builder pattern: output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Full path of the log file
    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join(&self.log_file)
    }

    pub fn memory_workload(&self) -> Workload {
        Workload::memory(self.memory_block_size.clone(), self.memory_total_size.clone())
    }

    pub fn cpu_sweep(&self) -> SweepConfig {
        self.sweep(Workload::Cpu)
    }

    pub fn memory_sweep(&self) -> SweepConfig {
        self.sweep(self.memory_workload())
    }

    fn sweep(&self, workload: Workload) -> SweepConfig {
        SweepConfig::new(self.name.clone(), workload)
            .threads_up_to(self.max_threads)
            .trial_duration(self.trial_duration)
    }
}

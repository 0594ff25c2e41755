//! Benchmark workloads and per-point invocation arguments
//!
//! A [`Workload`] says WHAT the tool measures; an [`InvocationSpec`] is the
//! frozen argument list for one sweep point.

use std::fmt;
use std::time::Duration;

use super::extractor::MetricKind;

/// Workload selector passed as the tool's first argument
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Workload {
    /// Prime-number computation, reported as events per second
    Cpu,

    /// Sequential memory transfer, reported in MiB/sec
    ///
    /// # Parameters
    /// - `block_size`: Tool-formatted size of one block (e.g. `"1M"`)
    /// - `total_size`: Tool-formatted total transfer size (e.g. `"24G"`)
    Memory {
        block_size: String,
        total_size: String,
    },
}

impl Workload {
    /// Memory workload with the given block and total sizes
    pub fn memory(block_size: impl Into<String>, total_size: impl Into<String>) -> Self {
        Workload::Memory {
            block_size: block_size.into(),
            total_size: total_size.into(),
        }
    }

    /// Selector understood by the tool
    pub fn name(&self) -> &str {
        match self {
            Workload::Cpu => "cpu",
            Workload::Memory { .. } => "memory",
        }
    }

    /// Metric extracted from this workload's output
    pub fn metric_kind(&self) -> MetricKind {
        match self {
            Workload::Cpu => MetricKind::CpuEventsPerSecond,
            Workload::Memory { .. } => MetricKind::MemoryTransferRate,
        }
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Workload::Cpu => write!(f, "CPU"),
            Workload::Memory { block_size, total_size } => {
                write!(f, "Memory ({} block, {} total)", block_size, total_size)
            }
        }
    }
}

/// Argument list and trial duration for a single invocation
///
/// Built once per sweep point and never modified afterwards.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use sweep_rs::harness::{InvocationSpec, Workload};
///
/// let spec = InvocationSpec::for_point(&Workload::Cpu, 4, Duration::from_secs(60));
/// assert_eq!(spec.args(), ["cpu", "--threads=4", "--time=60", "run"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationSpec {
    args: Vec<String>,
    trial_duration: Duration,
}

impl InvocationSpec {
    /// Build the arguments for `threads` workers running `workload` for `duration`
    pub fn for_point(workload: &Workload, threads: u32, duration: Duration) -> Self {
        let mut args = vec![workload.name().to_string(), format!("--threads={}", threads)];

        if let Workload::Memory { block_size, total_size } = workload {
            args.push(format!("--memory-block-size={}", block_size));
            args.push(format!("--memory-total-size={}", total_size));
        }

        args.push(format!("--time={}", duration.as_secs()));
        args.push("run".to_string());

        Self { args, trial_duration: duration }
    }

    /// Ordered tool arguments
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Declared trial duration (enforced by the tool, not by the harness)
    pub fn trial_duration(&self) -> Duration {
        self.trial_duration
    }

    /// Full command line as it would be typed in a shell
    pub fn command_line(&self, program: &str) -> String {
        std::iter::once(program)
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

//! sweep-rs: Benchmark Sweep-and-Parse Harness
//!
//! Drives an external micro-benchmark tool (`sysbench`) across a thread-count
//! sweep, pulls one metric out of each free-text report, and renders the
//! resulting series as plots and tables. A second, offline path analyses the
//! timing tables of a 1-D Jacobi-Poisson solver run under different
//! parallelization strategies.
//!
//! # Architecture
//!
//! Data flows one way:
//!
//! ```text
//! SweepConfig ──► SweepController ──► Runner ──► extract ──► SweepReport ──► output
//!                 (one point at a time)  (tool)   (regex)    (ordered samples)
//! ```
//!
//! A failed point never stops the sweep: it becomes a sample with an absent
//! metric. Only a missing tool aborts, as [`harness::HarnessError::Aborted`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sweep_rs::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SweepConfig::new("Machine 1", Workload::Cpu).threads_up_to(4);
//!
//! let mut controller = SweepController::new(ProcessRunner::default(), SweepLogger::console());
//! let report = controller.run(&config)?;
//!
//! for sample in report.samples() {
//!     println!("{} threads: {:?}", sample.threads, sample.metric);
//! }
//!
//! plot_sweep(&report, "machine_1_cpu_performance.png", None)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`harness`]: Runner, extractor and sweep controller
//! - [`logging`]: Explicit log sink scoped to one sweep
//! - [`analysis`]: Timing tables, speedup and summary statistics
//! - [`output`]: Plots (plotters) and tables (CSV/HTML)

pub mod harness;
pub mod logging;

pub mod analysis;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use sweep_rs::prelude::*;
    //! ```
    pub use crate::harness::{HarnessError,
                             Metric,
                             MetricKind,
                             ProcessRunner,
                             Runner,
                             Sample,
                             SweepConfig,
                             SweepController,
                             SweepReport,
                             Workload};
    pub use crate::logging::SweepLogger;
    pub use crate::output::{plot_sweep, CsvExporter, Exporter, PlotConfig};
}

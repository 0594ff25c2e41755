//! Post-processing of solver measurements
//!
//! - **timing**: `(N, NSTEPS, time)` records and their pivot table
//! - **stats**: speedup, per-series statistics, best strategy per size
//! - **solver_output**: two-column solution profiles written by the solver

pub mod solver_output;
pub mod stats;
pub mod timing;

pub use solver_output::{parse_xy_profile, read_xy_profile};
pub use stats::{best_per_size, speedup, BestEntry, Series, SeriesStats, StatsReport};
pub use timing::{read_timing_csv, PivotTable, TimingRecord};

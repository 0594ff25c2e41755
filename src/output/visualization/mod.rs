//! Visualization of sweep results and solver measurements
//!
//! All renderers use the `plotters` library and pick the backend from the
//! output file extension (`.svg` → SVG, anything else → bitmap).
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **sweep**: Metric versus thread count for one sweep
//! - **comparison**: Several labelled series on one x-axis, optional log axes
//! - **profile**: Solver solution profile with an inverted y axis
//! - **heatmap**: Timing pivot table as annotated viridis cells
//!
//! # Quick Start
//!
//! ## Sweep (Metric vs Threads)
//!
//! ```rust,ignore
//! use sweep_rs::output::visualization::{plot_sweep, sweep_plot_filename};
//!
//! let report = controller.run(&config)?;
//! plot_sweep(&report, &sweep_plot_filename(&report.label, &report.workload), None)?;
//! ```
//!
//! ## Comparison (Speedup vs Problem Size)
//!
//! ```rust,ignore
//! use sweep_rs::output::visualization::{plot_series_comparison, PlotConfig};
//!
//! let config = PlotConfig::scaling("Speedup", "Jacobi-Poisson 1D");
//! plot_series_comparison(&sizes, &series, "speedup.png", Some(&config))?;
//! ```
//!
//! # When to Use Which Module
//!
//! | Use Case | Module | Function |
//! |----------|--------|----------|
//! | One thread sweep | `sweep` | `plot_sweep` |
//! | Strategies over a shared x-axis | `comparison` | `plot_series_comparison` |
//! | Pivot slices with gaps | `comparison` | `plot_xy_series` |
//! | Solver solution | `profile` | `plot_profile` |
//! | Timing table overview | `heatmap` | `plot_pivot_heatmap` |

pub mod comparison;
pub mod config;
pub mod heatmap;
pub mod profile;
pub mod sweep;

pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};

pub use sweep::{
    plot_samples, plot_sweep, sweep_file_stem, sweep_plot_filename, sweep_plot_title, RenderStatus,
};

pub use comparison::{plot_series_comparison, plot_xy_series};

pub use heatmap::plot_pivot_heatmap;

pub use profile::plot_profile;

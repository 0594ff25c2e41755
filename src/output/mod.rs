//! Output module for sweep results and solver measurements
//!
//! This module turns collected data into files:
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV/HTML tables for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Plots
//! │   ├── mod.rs
//! │   ├── config.rs
//! │   ├── sweep.rs
//! │   ├── comparison.rs
//! │   ├── heatmap.rs
//! │   └── profile.rs
//! └── export/             ← Tables
//!     ├── mod.rs
//!     ├── csv.rs
//!     └── html.rs
//! ```
//!
//! # Quick Start
//!
//! ## Visualization
//!
//! ```rust,ignore
//! use sweep_rs::output::visualization::plot_sweep;
//!
//! plot_sweep(&report, "machine_1_cpu_performance.png", None)?;
//! ```
//!
//! ## CSV Export
//!
//! ```rust,ignore
//! use sweep_rs::output::export::{CsvExporter, Exporter};
//!
//! CsvExporter::default().export_sweep(&report, "machine_1_cpu_performance.csv")?;
//! ```
//!
//! Plots drop absent samples; tables keep them as empty cells so rows stay
//! aligned with the sweep.

pub mod export;
pub mod visualization;

pub use visualization::{
    plot_pivot_heatmap,
    plot_profile,
    plot_series_comparison,
    plot_sweep,
    plot_xy_series,
    PlotConfig,
    RenderStatus,
};

pub use export::{export_pivot_csv, export_pivot_html, CsvConfig, CsvExporter, ExportError, Exporter};

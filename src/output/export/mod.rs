//! Export of sweep results and timing tables.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format
//! of a sweep report. Each format is an independent implementation in its own
//! sub-module. Timing pivot tables are not sweeps and have plain functions
//! instead ([`export_pivot_csv`], [`export_pivot_html`]).
//!
//! # Available formats
//!
//! | Format | Module     | Sweep report    | Pivot table          |
//! |--------|------------|-----------------|----------------------|
//! | CSV    | [`csv`]    | [`CsvExporter`] | [`export_pivot_csv`] |
//! | HTML   | [`html`]   |                 | [`export_pivot_html`]|
//!
//! # Usage example
//!
//! ```rust,ignore
//! use sweep_rs::output::export::{CsvExporter, Exporter};
//!
//! let report = controller.run(&config)?;
//! CsvExporter::default().export_sweep(&report, "machine_1_cpu_performance.csv")?;
//! ```

pub mod csv;
pub mod html;

pub use csv::{export_pivot_csv, CsvConfig, CsvExporter, CsvMetadata};
pub use html::export_pivot_html;

use std::io;
use thiserror::Error;

use crate::harness::SweepReport;

/// Errors produced by the table exporters
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to write
    #[error("Empty data: {0}")]
    Empty(String),

    /// File could not be created or written
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Abstraction trait for sweep export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so the caller
/// can tell an empty report from a failed write.
///
/// # Absent samples
///
/// Unlike plots, exports keep every sample: a row per thread count, in sweep
/// order, with absent metrics written as an empty value.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports one sweep report to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the report contains no samples
    /// - the path is invalid or the directory does not exist
    fn export_sweep(&self, report: &SweepReport, path: &str) -> Result<(), Self::Error>;
}

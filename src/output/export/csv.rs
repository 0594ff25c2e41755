//! CSV export for sweep reports and timing pivot tables
//!
//! CSV files open in Excel, pandas, gnuplot and most analysis tools.
//!
//! # Features
//!
//! - **One row per sample**: absent metrics keep their row with an empty value
//! - **Metadata support**: Optional comment header with sweep parameters
//! - **Customizable**: Delimiter, precision, column headers
//!
//! # Quick Examples
//!
//! ## Sweep Report
//!
//! ```rust,ignore
//! use sweep_rs::output::export::{CsvExporter, Exporter};
//!
//! CsvExporter::default().export_sweep(&report, "machine_1_cpu_performance.csv")?;
//! ```
//!
//! **Output**:
//! ```csv
//! Threads,Events Per Second
//! 1,1000.000000
//! 2,
//! 3,1100.000000
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! use sweep_rs::output::export::{CsvConfig, CsvExporter, CsvMetadata};
//!
//! let config = CsvConfig::default()
//!     .precision(2)
//!     .with_metadata(CsvMetadata::from_report(&report));
//! CsvExporter::new(config).export_sweep(&report, "cpu.csv")?;
//! ```
//!
//! **Output**:
//! ```csv
//! # Benchmark Sweep Data
//! # Generated: 2026-02-11T15:30:00Z
//! # Label: Machine 1
//! # Workload: CPU
//! # Trial Duration: 60 s
//! #
//! Threads,Events Per Second
//! 1,1000.00
//! ...
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::info;

use super::{ExportError, Exporter};
use crate::analysis::PivotTable;
use crate::harness::SweepReport;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 3,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header for the thread-count column (default: "Threads")
    pub threads_header: String,

    /// Header for the metric column; `None` derives it from the metric kind
    pub metric_header: Option<String>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            precision: 6,
            include_metadata: false,
            metadata: None,
            threads_header: "Threads".to_string(),
            metric_header: None,
        }
    }
}

impl CsvConfig {
    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// All fields are optional. Only non-None fields are written.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    /// Sweep label (e.g. "Machine 1")
    pub label: Option<String>,

    /// Workload description (e.g. "Memory (1M block, 24G total)")
    pub workload: Option<String>,

    /// Trial duration per point (seconds)
    pub trial_duration: Option<u64>,

    /// Number of points in the sweep
    pub points: Option<usize>,
}

impl CsvMetadata {
    /// Metadata describing a sweep report
    pub fn from_report(report: &SweepReport) -> Self {
        Self {
            label: Some(report.label.clone()),
            workload: Some(report.workload.to_string()),
            trial_duration: Some(report.trial_duration.as_secs()),
            points: Some(report.len()),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(out: &mut W, title: &str, metadata: &CsvMetadata) -> io::Result<()> {
    writeln!(out, "# {}", title)?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(label) = &metadata.label {
        writeln!(out, "# Label: {}", label)?;
    }
    if let Some(workload) = &metadata.workload {
        writeln!(out, "# Workload: {}", workload)?;
    }
    if let Some(seconds) = metadata.trial_duration {
        writeln!(out, "# Trial Duration: {} s", seconds)?;
    }
    if let Some(points) = metadata.points {
        writeln!(out, "# Points: {}", points)?;
    }

    writeln!(out, "#")?;
    Ok(())
}

/// Format number with configured precision
fn format_number(value: f64, config: &CsvConfig) -> String {
    format!("{:.prec$}", value, prec = config.precision)
}

/// Empty cell for missing values
fn format_optional(value: Option<f64>, config: &CsvConfig) -> String {
    value.map(|v| format_number(v, config)).unwrap_or_default()
}

// =============================================================================
// Sweep Export
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Clone, Debug, Default)]
pub struct CsvExporter {
    config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Write a report to any writer
    pub fn write_sweep<W: Write>(&self, report: &SweepReport, out: &mut W) -> Result<(), ExportError> {
        if report.is_empty() {
            return Err(ExportError::Empty(format!("sweep '{}' has no samples", report.label)));
        }

        let config = &self.config;

        if config.include_metadata {
            if let Some(metadata) = &config.metadata {
                write_metadata_header(out, "Benchmark Sweep Data", metadata)?;
            }
        }

        let metric_header = config
            .metric_header
            .clone()
            .unwrap_or_else(|| report.metric_kind().axis_label().to_string());

        writeln!(out, "{}{}{}", config.threads_header, config.delimiter, metric_header)?;

        for sample in report.samples() {
            writeln!(
                out,
                "{}{}{}",
                sample.threads,
                config.delimiter,
                format_optional(sample.metric.value(), config)
            )?;
        }

        Ok(())
    }
}

impl Exporter for CsvExporter {
    type Error = ExportError;

    fn export_sweep(&self, report: &SweepReport, path: &str) -> Result<(), ExportError> {
        if report.is_empty() {
            return Err(ExportError::Empty(format!("sweep '{}' has no samples", report.label)));
        }

        let mut out = BufWriter::new(File::create(path)?);
        self.write_sweep(report, &mut out)?;
        out.flush()?;

        info!("Table saved to: {}", path);
        Ok(())
    }
}

// =============================================================================
// Pivot Export
// =============================================================================

/// Export a timing pivot table: header `N,<nsteps>...`, one row per N
///
/// Missing cells are written empty.
///
/// # Errors
///
/// - Empty table
/// - File creation errors
pub fn export_pivot_csv(
    table: &PivotTable,
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<(), ExportError> {
    if table.is_empty() {
        return Err(ExportError::Empty("pivot table has no cells".to_string()));
    }

    let binding = CsvConfig::default();
    let config = configuration.unwrap_or(&binding);

    let mut out = BufWriter::new(File::create(output_path)?);

    if config.include_metadata {
        if let Some(metadata) = &config.metadata {
            write_metadata_header(&mut out, "Solver Timing Table (seconds)", metadata)?;
        }
    }

    write!(out, "N")?;
    for nsteps in table.columns() {
        write!(out, "{}{}", config.delimiter, nsteps)?;
    }
    writeln!(out)?;

    for (n, cells) in table.iter_rows() {
        write!(out, "{}", n)?;
        for cell in cells {
            write!(out, "{}{}", config.delimiter, format_optional(*cell, config))?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    info!("Table saved to: {}", output_path);
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TimingRecord;
    use crate::harness::{AbsentReason, Metric, Sample, Workload};
    use std::fs;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn report() -> SweepReport {
        SweepReport::new(
            "Machine 1",
            Workload::Cpu,
            Duration::from_secs(60),
            vec![
                Sample::new(1, Metric::Present(1000.0)),
                Sample::new(2, Metric::Absent(AbsentReason::InvocationFailed)),
                Sample::new(3, Metric::Present(1100.0)),
            ],
        )
    }

    #[test]
    fn test_semicolon_delimiter() {
        let exporter = CsvExporter::new(CsvConfig::default().delimiter(';').precision(2));
        let mut buf = Vec::new();
        exporter.write_sweep(&report(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Threads;Events Per Second\n"));
        assert!(text.contains("\n2;\n"));
        assert_eq!(format_number(3.14159, exporter.config()), "3.14");
    }

    #[test]
    fn test_sweep_rows_keep_absent_samples() {
        let exporter = CsvExporter::new(CsvConfig::default().precision(1));
        let mut buf = Vec::new();
        exporter.write_sweep(&report(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Threads,Events Per Second");
        assert_eq!(&lines[1..], &["1,1000.0", "2,", "3,1100.0"]);
    }

    #[test]
    fn test_sweep_memory_header() {
        let report = SweepReport::new(
            "Machine 1",
            Workload::memory("1M", "24G"),
            Duration::from_secs(60),
            vec![Sample::new(1, Metric::Present(512.75))],
        );
        let mut buf = Vec::new();
        CsvExporter::default().write_sweep(&report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Threads,Transfer (MiB/sec)\n"));
        assert!(text.contains("1,512.750000"));
    }

    #[test]
    fn test_sweep_with_metadata() {
        let report = report();
        let config = CsvConfig::default().with_metadata(CsvMetadata::from_report(&report));
        let mut buf = Vec::new();
        CsvExporter::new(config).write_sweep(&report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("# Benchmark Sweep Data\n"));
        assert!(text.contains("# Label: Machine 1"));
        assert!(text.contains("# Workload: CPU"));
        assert!(text.contains("# Trial Duration: 60 s"));
        assert!(text.contains("# Points: 3"));
    }

    #[test]
    fn test_export_sweep_to_file() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        CsvExporter::default().export_sweep(&report(), path).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn test_export_empty_sweep_rejected() {
        let empty = SweepReport::new("Machine 1", Workload::Cpu, Duration::from_secs(60), vec![]);
        let file = NamedTempFile::new().unwrap();
        let err = CsvExporter::default()
            .export_sweep(&empty, file.path().to_str().unwrap())
            .unwrap_err();
        assert!(matches!(err, ExportError::Empty(_)));
    }

    #[test]
    fn test_export_invalid_path() {
        let err = CsvExporter::default()
            .export_sweep(&report(), "/nonexistent/dir/out.csv")
            .unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[test]
    fn test_export_pivot_csv() {
        let table = PivotTable::from_records(&[
            TimingRecord::new(100, 10, 0.5),
            TimingRecord::new(100, 20, 1.0),
            TimingRecord::new(200, 10, 2.0),
        ]);
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        export_pivot_csv(&table, path, Some(&CsvConfig::default().precision(3))).unwrap();

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["N,10,20", "100,0.500,1.000", "200,2.000,"]);
    }

    #[test]
    fn test_export_empty_pivot_rejected() {
        let table = PivotTable::from_records(&[]);
        let file = NamedTempFile::new().unwrap();
        assert!(export_pivot_csv(&table, file.path().to_str().unwrap(), None).is_err());
    }
}

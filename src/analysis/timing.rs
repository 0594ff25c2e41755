//! Solver timing tables
//!
//! Loads `(N, NSTEPS, time)` measurements of the sequential solver and
//! arranges them as a pivot table: one row per grid size `N`, one column per
//! iteration count `NSTEPS`.
//!
//! # Input format
//!
//! ```csv
//! N,NSTEPS,TIEMPO(s)
//! 1000,100,0.0012
//! 1000,1000,0.0110
//! 10000,100,0.0105
//! ```
//!
//! The time column may also be named `TIME(s)`.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Accepted names for the time column
const TIME_HEADERS: [&str; 2] = ["TIEMPO(s)", "TIME(s)"];

/// One timing measurement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingRecord {
    /// Grid size
    pub n: u64,

    /// Number of iterations
    pub nsteps: u64,

    /// Wall-clock time (seconds)
    pub seconds: f64,
}

impl TimingRecord {
    pub fn new(n: u64, nsteps: u64, seconds: f64) -> Self {
        Self { n, nsteps, seconds }
    }
}

/// Read timing records from a CSV file with an `N,NSTEPS,TIEMPO(s)` header
///
/// # Errors
///
/// - file cannot be opened or is not valid CSV
/// - a required column is missing
/// - a cell is not a number, or a time is negative / not finite
pub fn read_timing_csv(path: impl AsRef<Path>) -> Result<Vec<TimingRecord>, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;

    let headers = reader.headers()?.clone();
    let column = |names: &[&str]| -> Result<usize, Box<dyn Error>> {
        headers
            .iter()
            .position(|h| names.contains(&h))
            .ok_or_else(|| format!("Missing column: expected one of {:?}", names).into())
    };

    let n_col = column(&["N"])?;
    let nsteps_col = column(&["NSTEPS"])?;
    let time_col = column(&TIME_HEADERS)?;

    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let n: u64 = cell(n_col)
            .parse()
            .map_err(|e| format!("Row {}: invalid N '{}': {}", row + 1, cell(n_col), e))?;
        let nsteps: u64 = cell(nsteps_col)
            .parse()
            .map_err(|e| format!("Row {}: invalid NSTEPS '{}': {}", row + 1, cell(nsteps_col), e))?;
        let seconds: f64 = cell(time_col)
            .parse()
            .map_err(|e| format!("Row {}: invalid time '{}': {}", row + 1, cell(time_col), e))?;

        if !seconds.is_finite() || seconds < 0.0 {
            return Err(format!("Row {}: time must be a finite, non-negative number", row + 1).into());
        }

        records.push(TimingRecord::new(n, nsteps, seconds));
    }

    Ok(records)
}

// =================================================================================================
// Pivot Table
// =================================================================================================

/// Times arranged by grid size (rows) and iteration count (columns)
///
/// Duplicate `(N, NSTEPS)` entries are averaged. Combinations that were never
/// measured are `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct PivotTable {
    rows: Vec<u64>,
    columns: Vec<u64>,
    cells: Vec<Vec<Option<f64>>>,
}

impl PivotTable {
    /// Build the table from raw records
    pub fn from_records(records: &[TimingRecord]) -> Self {
        let rows: Vec<u64> = records.iter().map(|r| r.n).collect::<BTreeSet<_>>().into_iter().collect();
        let columns: Vec<u64> = records
            .iter()
            .map(|r| r.nsteps)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut sums = vec![vec![(0.0_f64, 0_usize); columns.len()]; rows.len()];

        for record in records {
            // Both searches succeed: rows/columns were built from these records
            if let (Ok(i), Ok(j)) = (rows.binary_search(&record.n), columns.binary_search(&record.nsteps)) {
                sums[i][j].0 += record.seconds;
                sums[i][j].1 += 1;
            }
        }

        let cells = sums
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|(sum, count)| (count > 0).then(|| sum / count as f64))
                    .collect()
            })
            .collect();

        Self { rows, columns, cells }
    }

    /// Grid sizes, ascending
    pub fn rows(&self) -> &[u64] {
        &self.rows
    }

    /// Iteration counts, ascending
    pub fn columns(&self) -> &[u64] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Mean time for `(n, nsteps)`
    pub fn get(&self, n: u64, nsteps: u64) -> Option<f64> {
        let i = self.rows.binary_search(&n).ok()?;
        let j = self.columns.binary_search(&nsteps).ok()?;
        self.cells[i][j]
    }

    /// Row `i` as one optional value per column
    pub fn row(&self, i: usize) -> Option<&[Option<f64>]> {
        self.cells.get(i).map(Vec::as_slice)
    }

    /// `(N, cells)` for each row, ascending N
    pub fn iter_rows(&self) -> impl Iterator<Item = (u64, &[Option<f64>])> + '_ {
        self.rows.iter().copied().zip(self.cells.iter().map(Vec::as_slice))
    }

    /// Smallest and largest measured time
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// For each NSTEPS, the measured `(N, time)` points in ascending N
    pub fn series_by_column(&self) -> Vec<(u64, Vec<(f64, f64)>)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(j, &nsteps)| {
                let points = self
                    .rows
                    .iter()
                    .enumerate()
                    .filter_map(|(i, &n)| self.cells[i][j].map(|t| (n as f64, t)))
                    .collect();
                (nsteps, points)
            })
            .collect()
    }

    /// For each N, the measured `(NSTEPS, time)` points in ascending NSTEPS
    pub fn series_by_row(&self) -> Vec<(u64, Vec<(f64, f64)>)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let points = self
                    .columns
                    .iter()
                    .enumerate()
                    .filter_map(|(j, &nsteps)| self.cells[i][j].map(|t| (nsteps as f64, t)))
                    .collect();
                (n, points)
            })
            .collect()
    }
}

impl fmt::Display for PivotTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>10}", "N \\ NSTEPS")?;
        for nsteps in &self.columns {
            write!(f, " {:>12}", nsteps)?;
        }
        writeln!(f)?;

        for (i, n) in self.rows.iter().enumerate() {
            write!(f, "{:>10}", n)?;
            for cell in &self.cells[i] {
                match cell {
                    Some(t) => write!(f, " {:>12.6}", t)?,
                    None => write!(f, " {:>12}", "NaN")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

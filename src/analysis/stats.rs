//! Comparison statistics across parallelization strategies
//!
//! Works on labelled [`Series`] sharing one x-axis (problem sizes). Provides
//! speedup against a sequential baseline, per-series min/max/mean, and the best
//! strategy for each problem size.

use std::error::Error;
use std::fmt;

/// A labelled sequence of values, one per x-axis point
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self { label: label.into(), values }
    }
}

/// Element-wise `baseline / parallel`
///
/// A point is `None` when either time is not finite or the parallel time is
/// not strictly positive.
///
/// # Errors
///
/// Returns an error if the two slices differ in length.
///
/// # Example
///
/// ```rust
/// use sweep_rs::analysis::speedup;
///
/// let s = speedup(&[2.0, 9.0], &[1.0, 3.0]).unwrap();
/// assert_eq!(s, vec![Some(2.0), Some(3.0)]);
/// ```
pub fn speedup(baseline: &[f64], parallel: &[f64]) -> Result<Vec<Option<f64>>, Box<dyn Error>> {
    if baseline.len() != parallel.len() {
        return Err(format!(
            "Data length mismatch: {} baseline times versus {} parallel times",
            baseline.len(),
            parallel.len()
        )
        .into());
    }

    Ok(baseline
        .iter()
        .zip(parallel)
        .map(|(&b, &p)| {
            if b.is_finite() && p.is_finite() && p > 0.0 {
                Some(b / p)
            } else {
                None
            }
        })
        .collect())
}

/// Minimum, maximum and mean of a series
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl SeriesStats {
    /// `None` for an empty slice
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(Self { min, max, mean })
    }
}

/// Fastest series at one problem size
#[derive(Clone, Debug, PartialEq)]
pub struct BestEntry {
    pub x: f64,
    pub label: String,
    pub value: f64,
}

/// For each x index, the series with the smallest value
///
/// Sizes where no series has a value are skipped.
pub fn best_per_size(x_values: &[f64], series: &[Series]) -> Vec<BestEntry> {
    x_values
        .iter()
        .enumerate()
        .filter_map(|(i, &x)| {
            series
                .iter()
                .filter_map(|s| s.values.get(i).map(|&v| (s, v)))
                .filter(|(_, v)| v.is_finite())
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(s, value)| BestEntry { x, label: s.label.clone(), value })
        })
        .collect()
}

/// Text report: per-series statistics and best configuration per size
#[derive(Clone, Debug)]
pub struct StatsReport<'a> {
    pub x_values: &'a [f64],
    pub series: &'a [Series],
}

impl<'a> StatsReport<'a> {
    pub fn new(x_values: &'a [f64], series: &'a [Series]) -> Self {
        Self { x_values, series }
    }
}

impl fmt::Display for StatsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== TIMING STATISTICS ===")?;
        writeln!(f, "{:<35} {:<10} {:<10} {:<12}", "Configuration", "Min (s)", "Max (s)", "Mean (s)")?;
        writeln!(f, "{}", "-".repeat(70))?;

        for s in self.series {
            match SeriesStats::of(&s.values) {
                Some(stats) => writeln!(
                    f,
                    "{:<35} {:<10.4} {:<10.4} {:<12.4}",
                    s.label, stats.min, stats.max, stats.mean
                )?,
                None => writeln!(f, "{:<35} {:<10} {:<10} {:<12}", s.label, "-", "-", "-")?,
            }
        }

        writeln!(f)?;
        writeln!(f, "=== BEST CONFIGURATION PER SIZE ===")?;
        writeln!(f, "{:<10} {:<35} {:<12}", "N", "Best configuration", "Time (s)")?;
        writeln!(f, "{}", "-".repeat(58))?;

        for entry in best_per_size(self.x_values, self.series) {
            writeln!(f, "{:<10} {:<35} {:<12.4}", entry.x, entry.label, entry.value)?;
        }

        Ok(())
    }
}

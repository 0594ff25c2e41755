//! Multi-series comparison plots
//!
//! Overlays several labelled series on one x-axis: speedup versus problem
//! size for each parallelization strategy, average time versus problem size,
//! and the time scaling curves of the sequential solver.
//!
//! # Logarithmic axes
//!
//! With `config.log_x` / `config.log_y` the data is drawn in log10 space and
//! the tick labels are mapped back to the original values. Values that are not
//! strictly positive cannot be placed on a log axis and are rejected.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sweep_rs::analysis::Series;
//! use sweep_rs::output::visualization::{plot_series_comparison, PlotConfig};
//!
//! let n = [10000.0, 50000.0, 100000.0];
//! let series = vec![
//!     Series::new("2 Threads", vec![0.47, 1.29, 1.39]),
//!     Series::new("Processes", vec![16.8, 68.3, 137.1]),
//! ];
//! let config = PlotConfig::scaling("Speedup", "Jacobi-Poisson 1D Speedup");
//! plot_series_comparison(&n, &series, "jacobi_speedup.png", Some(&config))?;
//! ```

use plotters::prelude::*;
use std::error::Error;
use tracing::info;

use super::config::{PlotConfig, NO_TITLE};
use crate::analysis::Series;

/// Map a value into plotting space
fn to_axis(value: f64, log: bool) -> f64 {
    if log {
        value.log10()
    } else {
        value
    }
}

/// Tick label for a plotting-space coordinate
fn axis_label(coord: f64, log: bool) -> String {
    if !log {
        return format_compact(coord);
    }
    format_compact(10f64.powf(coord))
}

/// `12,345` style for large values, 3 significant decimals for small ones
fn format_compact(value: f64) -> String {
    if value.abs() >= 1000.0 {
        let digits = format!("{:.0}", value.abs());
        let mut grouped = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        if value < 0.0 {
            grouped.insert(0, '-');
        }
        grouped
    } else if value.abs() >= 1.0 || value == 0.0 {
        format!("{:.2}", value)
    } else {
        format!("{:.3e}", value)
    }
}

/// Padded `(min, max)` range in plotting space
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let span = (hi - lo).abs().max(1e-9);
    (lo - 0.05 * span, hi + 0.05 * span)
}

/// Plot several labelled series over a shared x-axis
///
/// # Arguments
///
/// * `x_values`    - Shared x coordinates (e.g. problem sizes)
/// * `series`      - One entry per configuration, `values.len() == x_values.len()`
/// * `output_path` - Output file path (`.png` or `.svg`)
/// * `config`      - Optional plot configuration; `None` uses
///                   `PlotConfig::scaling` defaults (log-log)
///
/// # Errors
///
/// Returns `Err` if:
/// - `x_values` or `series` is empty
/// - a series length differs from `x_values`
/// - a value is not finite, or not positive on a log axis
/// - the backend fails
pub fn plot_series_comparison(
    x_values: &[f64],
    series: &[Series],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {

    // ============================= Validation =============================

    if x_values.is_empty() || series.is_empty() {
        return Err("No data: x values and series must not be empty".into());
    }

    for s in series {
        if s.values.len() != x_values.len() {
            return Err(format!(
                "Series '{}' length mismatch: {} values versus {} x points",
                s.label,
                s.values.len(),
                x_values.len()
            )
            .into());
        }
    }

    let datasets: Vec<(String, Vec<(f64, f64)>)> = series
        .iter()
        .map(|s| (s.label.clone(), x_values.iter().copied().zip(s.values.iter().copied()).collect()))
        .collect();

    plot_xy_series(&datasets, output_path, config)
}

/// Plot labelled point sets that need not share x coordinates
///
/// Used for pivot-table slices, where a series only holds the cells that were
/// actually measured. `None` config uses `PlotConfig::scaling` defaults.
///
/// # Errors
///
/// Returns `Err` if there are no datasets, a dataset is empty, a value is not
/// finite (or not positive on a log axis), or the backend fails.
pub fn plot_xy_series(
    datasets: &[(String, Vec<(f64, f64)>)],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if datasets.is_empty() {
        return Err("No data: at least one series is required".into());
    }

    let default_config = PlotConfig::scaling("Value", NO_TITLE);
    let config = config.unwrap_or(&default_config);

    for (label, points) in datasets {
        if points.is_empty() {
            return Err(format!("Series '{}' has no points", label).into());
        }
        let bad = points.iter().any(|&(x, y)| {
            !x.is_finite() || !y.is_finite() || (config.log_x && x <= 0.0) || (config.log_y && y <= 0.0)
        });
        if bad {
            return Err(format!(
                "Invalid data in series '{}': values must be finite (and positive on a log axis)",
                label
            )
            .into());
        }
    }

    // ============================= Transform ==============================

    let transformed: Vec<(&str, Vec<(f64, f64)>)> = datasets
        .iter()
        .map(|(label, points)| {
            let points = points
                .iter()
                .map(|&(x, y)| (to_axis(x, config.log_x), to_axis(y, config.log_y)))
                .collect();
            (label.as_str(), points)
        })
        .collect();

    let x_range = padded_range(transformed.iter().flat_map(|(_, p)| p.iter().map(|pt| pt.0)));
    let y_range = padded_range(transformed.iter().flat_map(|(_, p)| p.iter().map(|pt| pt.1)));

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_comparison_impl(backend, &transformed, config, x_range, y_range)?
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_comparison_impl(backend, &transformed, config, x_range, y_range)?
        }
    }

    info!("Plot saved to: {}", output_path);
    Ok(())
}

/// Render overlaid series with the given drawing backend
///
/// Markers rotate through circle, square, triangle and cross per series index.
fn plot_comparison_impl<DB: DrawingBackend>(
    backend: DB,
    datasets: &[(&str, Vec<(f64, f64)>)],
    config: &PlotConfig,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    let log_x = config.log_x;
    let log_y = config.log_y;

    let mut mesh = chart.configure_mesh();
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&|x| axis_label(*x, log_x))
        .y_label_formatter(&|y| axis_label(*y, log_y))
        .draw()?;

    let size = config.marker_size as i32;

    for (idx, (label, points)) in datasets.iter().enumerate() {
        let color = config.get_series_color(idx);
        let style = color.stroke_width(config.line_width);

        chart
            .draw_series(LineSeries::new(points.iter().copied(), style))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        if size > 0 {
            match idx % 4 {
                0 => {
                    chart.draw_series(points.iter().map(|&p| Circle::new(p, size, color.filled())))?;
                }
                1 => {
                    chart.draw_series(points.iter().map(|&p| {
                        EmptyElement::at(p)
                            + Rectangle::new([(-size, -size), (size, size)], color.filled())
                    }))?;
                }
                2 => {
                    chart.draw_series(
                        points.iter().map(|&p| TriangleMarker::new(p, size + 1, color.filled())),
                    )?;
                }
                _ => {
                    chart.draw_series(points.iter().map(|&p| Cross::new(p, size, color.stroke_width(2))))?;
                }
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

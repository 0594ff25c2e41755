//! Thread-sweep plots
//!
//! Renders a sweep's samples as a line with point markers, one x tick per
//! thread count.
//!
//! # Missing values
//!
//! Samples with an absent metric are filtered out before drawing; the order of
//! the remaining samples is kept. If nothing is left the plot is skipped with
//! a warning and [`RenderStatus::Skipped`] is returned: an empty sweep never
//! fails the run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sweep_rs::output::visualization::{plot_sweep, sweep_plot_filename};
//!
//! let report = controller.run(&config)?;
//! let path = out_dir.join(sweep_plot_filename(&report.label, &report.workload));
//! plot_sweep(&report, path.to_str().unwrap(), None)?;
//! ```

use plotters::prelude::*;
use std::error::Error;
use tracing::{info, warn};

use super::config::PlotConfig;
use crate::harness::{Sample, SweepReport, Workload};

/// What a renderer did with its input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStatus {
    /// File written with this many points
    Rendered { points: usize },

    /// Nothing to draw; no file written
    Skipped,
}

/// File name for a sweep plot: `<label>_cpu_performance.png` or
/// `<label>_memory_<total>_performance.png`, label lower-cased with spaces
/// replaced by `_`
pub fn sweep_plot_filename(label: &str, workload: &Workload) -> String {
    format!("{}.png", sweep_file_stem(label, workload))
}

/// File stem shared by the plot and table of one sweep
pub fn sweep_file_stem(label: &str, workload: &Workload) -> String {
    let slug = label.replace(' ', "_").to_lowercase();
    match workload {
        Workload::Cpu => format!("{}_cpu_performance", slug),
        Workload::Memory { total_size, .. } => format!("{}_memory_{}_performance", slug, total_size),
    }
}

/// Title for a sweep plot
pub fn sweep_plot_title(report: &SweepReport) -> String {
    let seconds = report.trial_duration.as_secs();
    match &report.workload {
        Workload::Cpu => format!("{} - Sysbench CPU Benchmark (Time={}s)", report.label, seconds),
        Workload::Memory { block_size, total_size } => format!(
            "{} - Sysbench Memory Benchmark ({}, {} block, Time={}s)",
            report.label, total_size, block_size, seconds
        ),
    }
}

/// Plot a sweep report with a title and labels derived from it
///
/// `config` overrides the derived defaults when given.
pub fn plot_sweep(
    report: &SweepReport,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<RenderStatus, Box<dyn Error>> {
    let default_config = PlotConfig::sweep(report.metric_kind(), sweep_plot_title(report));
    let config = config.unwrap_or(&default_config);
    plot_samples(report.samples(), output_path, config)
}

/// Plot an ordered sample sequence
///
/// # Errors
///
/// Returns `Err` only if the backend cannot write to `output_path`.
/// An input without any present metric is skipped, not an error.
pub fn plot_samples(
    samples: &[Sample],
    output_path: &str,
    config: &PlotConfig,
) -> Result<RenderStatus, Box<dyn Error>> {
    if samples.is_empty() {
        warn!("Plot '{}' not generated: no samples.", output_path);
        return Ok(RenderStatus::Skipped);
    }

    let points: Vec<(u32, f64)> = samples.iter().filter_map(Sample::point).collect();

    if points.is_empty() {
        warn!("Plot '{}' not generated: no valid Y values.", output_path);
        return Ok(RenderStatus::Skipped);
    }

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_samples_impl(backend, &points, config)?
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_samples_impl(backend, &points, config)?
        }
    }

    info!("Plot saved to: {}", output_path);
    Ok(RenderStatus::Rendered { points: points.len() })
}

/// Render the filtered points with the given drawing backend
fn plot_samples_impl<DB: DrawingBackend>(
    backend: DB,
    points: &[(u32, f64)],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let x_min = points.iter().map(|p| p.0).min().unwrap_or(1);
    let x_max = points.iter().map(|p| p.0).max().unwrap_or(1);
    let y_max = points
        .iter()
        .map(|p| p.1)
        .fold(f64::NEG_INFINITY, f64::max)
        .max(1e-10);

    // One tick per integer thread count, padded by one on each side
    let x_range = x_min.saturating_sub(1)..(x_max + 1);
    let x_ticks = (x_range.end - x_range.start + 1) as usize;

    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, 0.0..(y_max * 1.1))?;

    let mut mesh = chart.configure_mesh();
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_labels(x_ticks)
        .x_label_formatter(&|x| format!("{}", x))
        .y_label_formatter(&|y| format!("{:.1}", y))
        .draw()?;

    let style = ShapeStyle::from(&config.line_color).stroke_width(config.line_width);

    chart.draw_series(LineSeries::new(points.iter().copied(), style))?;

    if config.marker_size > 0 {
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), config.marker_size, config.line_color.filled())),
        )?;
    }

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

//! Solver solution profile plots
//!
//! Draws the `(x, y)` solution written by the Poisson solver as a single
//! curve. The y axis is inverted (values grow downward), matching how the
//! solver results are usually inspected.

use plotters::prelude::*;
use std::error::Error;
use tracing::info;

use super::config::{PlotConfig, NO_TITLE};

/// Plot a solution profile with an inverted y axis
///
/// # Errors
///
/// Returns `Err` if `points` is empty, contains non-finite values, or the
/// backend fails.
pub fn plot_profile(
    points: &[(f64, f64)],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if points.is_empty() {
        return Err("No data: profile is empty".into());
    }

    if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err("Invalid data: profile contains non-finite values".into());
    }

    let default_config = PlotConfig::profile(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    // Inverted axis: draw -y and label ticks with the original value
    let flipped: Vec<(f64, f64)> = points.iter().map(|&(x, y)| (x, -y)).collect();

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_profile_impl(backend, &flipped, config)?
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_profile_impl(backend, &flipped, config)?
        }
    }

    info!("Plot saved to: {}", output_path);
    Ok(())
}

fn plot_profile_impl<DB: DrawingBackend>(
    backend: DB,
    points: &[(f64, f64)],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (x_min, x_max, y_min, y_max) = points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(x0, x1, y0, y1), &(x, y)| (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
    );
    let x_pad = ((x_max - x_min) * 0.02).max(1e-9);
    let y_pad = ((y_max - y_min) * 0.05).max(1e-9);

    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(
            (x_min - x_pad)..(x_max + x_pad),
            (y_min - y_pad)..(y_max + y_pad),
        )?;

    let mut mesh = chart.configure_mesh();
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&|x| format!("{:.2}", x))
        .y_label_formatter(&|y| format!("{:.3}", -y))
        .draw()?;

    let style = ShapeStyle::from(&config.line_color).stroke_width(config.line_width);
    chart.draw_series(LineSeries::new(points.iter().copied(), style))?;

    if config.marker_size > 0 {
        chart.draw_series(
            points
                .iter()
                .map(|&p| Circle::new(p, config.marker_size, config.line_color.filled())),
        )?;
    }

    root.present()?;
    Ok(())
}

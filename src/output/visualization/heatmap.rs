//! Heatmap of a timing pivot table
//!
//! One cell per `(N, NSTEPS)` combination, coloured on a viridis scale from
//! the fastest to the slowest measured time and annotated with the value.
//! Combinations that were never measured stay blank. The first (smallest) N
//! is the top row.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use tracing::info;

use super::config::{is_light, viridis, PlotConfig, NO_TITLE};
use crate::analysis::PivotTable;

/// Plot a pivot table as an annotated heatmap
///
/// # Arguments
///
/// * `table` - Mean times by N (rows) and NSTEPS (columns)
/// * `output_path` - `.svg` for vector output, anything else for a bitmap
/// * `config` - Optional configuration (default: [`PlotConfig::heatmap`])
///
/// # Errors
///
/// Returns `Err` if the table has no measured cell or the backend fails.
///
/// # Example
///
/// ```rust,ignore
/// let table = PivotTable::from_records(&read_timing_csv("tiempos.csv")?);
/// plot_pivot_heatmap(&table, "heatmap_times.png", None)?;
/// ```
pub fn plot_pivot_heatmap(
    table: &PivotTable,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if table.value_range().is_none() {
        return Err("No data: pivot table has no measured cells".into());
    }

    let default_config = PlotConfig::heatmap(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_heatmap_impl(backend, table, config)?
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_heatmap_impl(backend, table, config)?
        }
    }

    info!("Plot saved to: {}", output_path);
    Ok(())
}

fn plot_heatmap_impl<DB: DrawingBackend>(
    backend: DB,
    table: &PivotTable,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (lo, hi) = table.value_range().unwrap_or((0.0, 0.0));
    let span = hi - lo;

    let columns = table.columns();
    let rows = table.rows();
    let n_cols = columns.len() as u32;
    let n_rows = rows.len() as u32;

    // Row r is drawn at y = n_rows - 1 - r so the first row sits on top
    let flip = |r: u32| n_rows - 1 - r;

    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d((0..n_cols).into_segmented(), (0..n_rows).into_segmented())?;

    let column_label = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(j) => columns.get(*j as usize).map(u64::to_string).unwrap_or_default(),
        _ => String::new(),
    };
    let row_label = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(y) if *y < n_rows => rows[flip(*y) as usize].to_string(),
        _ => String::new(),
    };

    let mut mesh = chart.configure_mesh();
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_labels(columns.len())
        .y_labels(rows.len())
        .x_label_formatter(&column_label)
        .y_label_formatter(&row_label)
        .draw()?;

    let cells: Vec<(u32, u32, f64)> = table
        .iter_rows()
        .enumerate()
        .flat_map(|(r, (_, values))| {
            values
                .iter()
                .enumerate()
                .filter_map(move |(c, v)| v.map(|v| (c as u32, flip(r as u32), v)))
        })
        .collect();

    let shade = |value: f64| viridis(if span > 0.0 { (value - lo) / span } else { 0.0 });

    chart.draw_series(cells.iter().map(|&(x, y, value)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
            ],
            shade(value).filled(),
        )
    }))?;

    let font_size = (config.height / (4 * n_rows.max(1))).clamp(10, 18);
    chart.draw_series(cells.iter().map(|&(x, y, value)| {
        let fg = if is_light(shade(value)) { BLACK } else { WHITE };
        let style = ("sans-serif", font_size)
            .into_font()
            .color(&fg)
            .pos(Pos::new(HPos::Center, VPos::Center));
        Text::new(
            format!("{:.3}", value),
            (SegmentValue::CenterOf(x), SegmentValue::CenterOf(y)),
            style,
        )
    }))?;

    root.present()?;
    Ok(())
}

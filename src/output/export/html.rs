//! HTML export for timing pivot tables
//!
//! A self-contained page (inline style, no scripts) with one cell per
//! `(N, NSTEPS)` combination. Each measured cell gets a background colour from
//! a viridis-like gradient scaled between the smallest and largest time.

use plotters::style::RGBColor;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

use super::ExportError;
use crate::analysis::PivotTable;
use crate::output::visualization::config::{is_light, viridis};

const STYLE: &str = "table {border-collapse: collapse; font-family: Arial;} \
th, td {padding: 8px; border: 1px solid #ddd;} \
th {background-color: #f2f2f2;}";

/// Black or white, whichever reads better on `bg`
fn text_color(bg: RGBColor) -> &'static str {
    if is_light(bg) {
        "#000000"
    } else {
        "#f1f1f1"
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the page to any writer
pub fn write_pivot_html<W: Write>(table: &PivotTable, title: &str, out: &mut W) -> Result<(), ExportError> {
    if table.is_empty() {
        return Err(ExportError::Empty("pivot table has no cells".to_string()));
    }

    let title = escape(title);
    let (lo, hi) = table.value_range().unwrap_or((0.0, 0.0));
    let span = hi - lo;

    writeln!(out, "<html><head><title>{}</title>", title)?;
    writeln!(out, "<style>{}</style>", STYLE)?;
    writeln!(out, "</head><body>")?;
    writeln!(out, "<h2>{}</h2>", title)?;
    writeln!(out, "<table>")?;

    write!(out, "<thead><tr><th>N \\ NSTEPS</th>")?;
    for nsteps in table.columns() {
        write!(out, "<th>{}</th>", nsteps)?;
    }
    writeln!(out, "</tr></thead>")?;

    writeln!(out, "<tbody>")?;
    for (n, cells) in table.iter_rows() {
        write!(out, "<tr><th>{}</th>", n)?;
        for cell in cells {
            match cell {
                Some(value) => {
                    let t = if span > 0.0 { (value - lo) / span } else { 0.0 };
                    let bg = viridis(t);
                    write!(
                        out,
                        "<td style=\"background-color: #{:02x}{:02x}{:02x}; color: {};\">{:.3}</td>",
                        bg.0,
                        bg.1,
                        bg.2,
                        text_color(bg),
                        value
                    )?;
                }
                None => write!(out, "<td>nan</td>")?,
            }
        }
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</tbody>")?;

    writeln!(out, "</table>")?;
    writeln!(out, "</body></html>")?;
    Ok(())
}

/// Export a timing pivot table as a styled HTML page
///
/// # Errors
///
/// - Empty table
/// - File creation errors
pub fn export_pivot_html(table: &PivotTable, title: &str, output_path: &str) -> Result<(), ExportError> {
    if table.is_empty() {
        return Err(ExportError::Empty("pivot table has no cells".to_string()));
    }

    let mut out = BufWriter::new(File::create(output_path)?);
    write_pivot_html(table, title, &mut out)?;
    out.flush()?;

    info!("Table saved to: {}", output_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TimingRecord;

    fn table() -> PivotTable {
        PivotTable::from_records(&[
            TimingRecord::new(100, 10, 0.5),
            TimingRecord::new(100, 20, 1.0),
            TimingRecord::new(200, 10, 2.0),
        ])
    }

    #[test]
    fn test_text_color_contrast() {
        assert_eq!(text_color(viridis(0.0)), "#f1f1f1");
        assert_eq!(text_color(viridis(1.0)), "#000000");
    }

    #[test]
    fn test_html_contents() {
        let mut buf = Vec::new();
        write_pivot_html(&table(), "Timing Table (seconds)", &mut buf).unwrap();
        let html = String::from_utf8(buf).unwrap();

        assert!(html.contains("<h2>Timing Table (seconds)</h2>"));
        assert!(html.contains("<th>10</th><th>20</th>"));
        assert!(html.contains(">0.500</td>"));
        assert!(html.contains(">2.000</td>"));
        assert!(html.contains("<td>nan</td>"));
        // Smallest value gets the darkest colour, largest the brightest
        assert!(html.contains("background-color: #440154"));
        assert!(html.contains("background-color: #fde725"));
    }

    #[test]
    fn test_title_is_escaped() {
        let mut buf = Vec::new();
        write_pivot_html(&table(), "N < 1000 & more", &mut buf).unwrap();
        let html = String::from_utf8(buf).unwrap();
        assert!(html.contains("N &lt; 1000 &amp; more"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tabla_tiempos.html");
        export_pivot_html(&table(), "Timing Table", path.to_str().unwrap()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_empty_table_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.html");
        let empty = PivotTable::from_records(&[]);
        let err = export_pivot_html(&empty, "Empty", path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ExportError::Empty(_)));
        assert!(!path.exists());
    }
}

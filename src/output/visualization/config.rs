//! Plot configuration shared across visualization modules
//!
//! This module defines the configuration used by sweep plots, multi-series
//! comparison plots and solver profile plots.

use plotters::prelude::*;

use crate::harness::MetricKind;

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `line_color`: Line color for single-series plots
/// - `series_colors`: Optional colors for multi-series plots (one per series)
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `marker_size`: Radius of point markers (0 disables markers)
/// - `show_grid`: Whether to show grid lines
/// - `log_x`, `log_y`: Logarithmic axes (comparison plots)
///
/// # Example
///
/// ```rust,ignore
/// use sweep_rs::output::visualization::PlotConfig;
/// use sweep_rs::harness::MetricKind;
///
/// let mut config = PlotConfig::sweep(MetricKind::CpuEventsPerSecond, "Machine 1 - CPU");
/// config.width = 1920;
/// config.height = 1080;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1000)
    pub width: u32,

    /// Image height in pixels (default: 600)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: "Number of Threads")
    pub xlabel: String,

    /// Y-axis label (default: empty, set by plot type)
    pub ylabel: String,

    /// Line color for single-series plots (default: BLUE)
    pub line_color: RGBColor,

    /// Optional colors for multi-series plots
    ///
    /// If None, uses the default palette.
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Marker radius in pixels (default: 4)
    pub marker_size: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,

    /// Logarithmic x axis (default: false)
    pub log_x: bool,

    /// Logarithmic y axis (default: false)
    pub log_y: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            title: "Plot".to_string(),
            xlabel: "Number of Threads".to_string(),
            ylabel: String::new(),
            line_color: BLUE,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            marker_size: 4,
            show_grid: true,
            log_x: false,
            log_y: false,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

/// Default multi-series palette: #1f77b4, #ff7f0e, #2ca02c, #d62728, #9467bd, ...
const DEFAULT_PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

/// Viridis anchor colours, low to high
const VIRIDIS: [RGBColor; 5] = [
    RGBColor(68, 1, 84),
    RGBColor(59, 82, 139),
    RGBColor(33, 145, 140),
    RGBColor(94, 201, 98),
    RGBColor(253, 231, 37),
];

/// Interpolated viridis colour for `t` in `[0, 1]`; NaN maps to the low end
pub(crate) fn viridis(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - i as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (VIRIDIS[i], VIRIDIS[i + 1]);
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Whether dark text reads better than light text on `bg`
pub(crate) fn is_light(bg: RGBColor) -> bool {
    0.299 * bg.0 as f64 + 0.587 * bg.1 as f64 + 0.114 * bg.2 as f64 > 140.0
}

impl PlotConfig {
    /// Create config for a thread sweep of the given metric
    ///
    /// Sets xlabel to "Number of Threads", ylabel from the metric kind and the
    /// title to the custom value or "Benchmark Sweep".
    pub fn sweep(kind: MetricKind, title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.ylabel = kind.axis_label().to_string();
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Benchmark Sweep".to_string());
        config
    }

    /// Create config for a metric versus problem size comparison
    ///
    /// Sets xlabel to "Problem Size (N)", the given ylabel, and log scales on
    /// both axes (timings span several orders of magnitude).
    pub fn scaling(ylabel: &str, title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.width = 1200;
        config.height = 800;
        config.xlabel = "Problem Size (N)".to_string();
        config.ylabel = ylabel.to_string();
        config.log_x = true;
        config.log_y = true;
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Scaling Comparison".to_string());
        config
    }

    /// Create config for a solver solution profile (x, y)
    pub fn profile(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.xlabel = "X".to_string();
        config.ylabel = "Y".to_string();
        config.marker_size = 0;
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Solution Profile".to_string());
        config
    }

    /// Create config for a timing pivot heatmap (NSTEPS across, N down)
    pub fn heatmap(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.width = 1000;
        config.height = 800;
        config.xlabel = "NSTEPS".to_string();
        config.ylabel = "N".to_string();
        config.show_grid = false;
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Execution Time (s)".to_string());
        config
    }

    /// Builder pattern: custom series colors
    pub fn with_series_colors(mut self, colors: Vec<RGBColor>) -> Self {
        self.series_colors = Some(colors);
        self
    }

    /// Get color for series at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn get_series_color(&self, series_index: usize) -> RGBColor {
        if let Some(colors) = &self.series_colors {
            if series_index < colors.len() {
                return colors[series_index];
            }
        }
        DEFAULT_PALETTE[series_index % DEFAULT_PALETTE.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================

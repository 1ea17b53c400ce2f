//! SVG rendering of reliability curves.
//!
//! The look of the plot is plain data in [`PlotStyle`], so a front end can
//! swap themes without touching the drawing code.
//!
//! # Examples
//!
//! ```
//! use u_reliability::exponential::build_default_curve;
//! use u_reliability::plot::{render_svg, PlotStyle};
//!
//! let curve = build_default_curve(500.0).unwrap();
//! let svg = render_svg(&curve, &PlotStyle::default()).unwrap();
//! assert!(svg.starts_with("<svg"));
//! assert!(svg.contains("MTBF = 500"));
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ReliabilityError, Result};
use crate::exponential::Curve;
use crate::report::format_value;

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 52.0;
const GRID_DIVISIONS: usize = 5;

/// Smallest accepted width or height, in pixels.
pub const MIN_PLOT_SIZE: u32 = 160;

// serde default functions
fn default_width() -> u32 {
    600
}

fn default_height() -> u32 {
    400
}

fn default_title() -> String {
    "Reliability Curve".to_string()
}

fn default_x_label() -> String {
    "Time".to_string()
}

fn default_y_label() -> String {
    "Reliability".to_string()
}

fn default_line_color() -> String {
    "#1f77b4".to_string()
}

fn default_background() -> String {
    "#ffffff".to_string()
}

fn default_grid_color() -> String {
    "#d9d9d9".to_string()
}

fn default_true() -> bool {
    true
}

/// Plot theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotStyle {
    /// Image width in pixels, at least [`MIN_PLOT_SIZE`].
    #[serde(default = "default_width")]
    pub width: u32,
    /// Image height in pixels, at least [`MIN_PLOT_SIZE`].
    #[serde(default = "default_height")]
    pub height: u32,
    /// Title drawn above the plot area.
    #[serde(default = "default_title")]
    pub title: String,
    /// Label under the time axis.
    #[serde(default = "default_x_label")]
    pub x_label: String,
    /// Label beside the reliability axis.
    #[serde(default = "default_y_label")]
    pub y_label: String,
    /// SVG color of the curve and its legend swatch.
    #[serde(default = "default_line_color")]
    pub line_color: String,
    /// SVG color of the canvas.
    #[serde(default = "default_background")]
    pub background: String,
    /// SVG color of the grid lines.
    #[serde(default = "default_grid_color")]
    pub grid_color: String,
    /// Draw grid lines at every tick.
    #[serde(default = "default_true")]
    pub grid: bool,
    /// Draw the `MTBF = ..` legend.
    #[serde(default = "default_true")]
    pub legend: bool,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            x_label: default_x_label(),
            y_label: default_y_label(),
            line_color: default_line_color(),
            background: default_background(),
            grid_color: default_grid_color(),
            grid: true,
            legend: true,
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Tick labels: integers without a fraction, other values to 2 decimals,
/// exponent form outside [1e-3, 1e9).
fn tick_label(v: f64) -> String {
    let magnitude = v.abs();
    if v != 0.0 && !(1e-3..1e9).contains(&magnitude) {
        format!("{v:.2e}")
    } else if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

/// Renders `curve` as a standalone SVG document.
///
/// X runs from 0 to the curve's last time, Y from 0 to 1.
///
/// # Errors
///
/// [`ReliabilityError::InvalidParameter`] if the curve has fewer than two
/// points, its last time is not positive and finite, or the style is
/// smaller than [`MIN_PLOT_SIZE`] in either direction.
pub fn render_svg(curve: &Curve, style: &PlotStyle) -> Result<String> {
    if curve.len() < 2 {
        return Err(ReliabilityError::invalid(
            "curve",
            curve.len(),
            "needs at least 2 points",
        ));
    }
    let x_max = curve.last().map_or(0.0, |p| p.time);
    if !x_max.is_finite() || x_max <= 0.0 {
        return Err(ReliabilityError::invalid(
            "curve",
            x_max,
            "last time must be positive and finite",
        ));
    }
    if style.width < MIN_PLOT_SIZE || style.height < MIN_PLOT_SIZE {
        return Err(ReliabilityError::invalid(
            "style",
            format!("{}x{}", style.width, style.height),
            "plot is too small",
        ));
    }

    let width = f64::from(style.width);
    let height = f64::from(style.height);
    let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;

    let sx = |t: f64| MARGIN_LEFT + t / x_max * plot_w;
    let sy = |r: f64| MARGIN_TOP + (1.0 - r) * plot_h;

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = style.width,
        h = style.height
    ));
    lines.push(format!(
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        escape(&style.background)
    ));

    let grid_color = escape(&style.grid_color);
    for i in 0..=GRID_DIVISIONS {
        let frac = i as f64 / GRID_DIVISIONS as f64;
        let x = sx(frac * x_max);
        let y = sy(frac);
        if style.grid {
            lines.push(format!(
                r#"<line x1="{x:.2}" y1="{top:.2}" x2="{x:.2}" y2="{bottom:.2}" stroke="{grid_color}" stroke-width="1"/>"#,
                top = MARGIN_TOP,
                bottom = MARGIN_TOP + plot_h,
            ));
            lines.push(format!(
                r#"<line x1="{left:.2}" y1="{y:.2}" x2="{right:.2}" y2="{y:.2}" stroke="{grid_color}" stroke-width="1"/>"#,
                left = MARGIN_LEFT,
                right = MARGIN_LEFT + plot_w,
            ));
        }
        lines.push(format!(
            r#"<text x="{x:.2}" y="{ty:.2}" font-size="11" text-anchor="middle">{label}</text>"#,
            ty = MARGIN_TOP + plot_h + 16.0,
            label = tick_label(frac * x_max)
        ));
        lines.push(format!(
            r#"<text x="{tx:.2}" y="{ty:.2}" font-size="11" text-anchor="end">{label}</text>"#,
            tx = MARGIN_LEFT - 6.0,
            ty = y + 4.0,
            label = tick_label(frac)
        ));
    }

    lines.push(format!(
        r#"<rect x="{MARGIN_LEFT:.2}" y="{MARGIN_TOP:.2}" width="{plot_w:.2}" height="{plot_h:.2}" fill="none" stroke="black" stroke-width="1"/>"#
    ));

    let vertices: Vec<String> = curve
        .points()
        .iter()
        .map(|p| format!("{:.2},{:.2}", sx(p.time), sy(p.reliability)))
        .collect();
    lines.push(format!(
        r#"<polyline fill="none" stroke="{}" stroke-width="2" points="{}"/>"#,
        escape(&style.line_color),
        vertices.join(" ")
    ));

    lines.push(format!(
        r#"<text x="{x:.2}" y="24" font-size="16" text-anchor="middle">{}</text>"#,
        escape(&style.title),
        x = width / 2.0
    ));
    lines.push(format!(
        r#"<text x="{x:.2}" y="{y:.2}" font-size="13" text-anchor="middle">{}</text>"#,
        escape(&style.x_label),
        x = MARGIN_LEFT + plot_w / 2.0,
        y = height - 12.0
    ));
    lines.push(format!(
        r#"<text x="16" y="{y:.2}" font-size="13" text-anchor="middle" transform="rotate(-90 16 {y:.2})">{}</text>"#,
        escape(&style.y_label),
        y = MARGIN_TOP + plot_h / 2.0
    ));

    if style.legend {
        let lx = MARGIN_LEFT + plot_w - 130.0;
        let ly = MARGIN_TOP + 16.0;
        lines.push(format!(
            r#"<line x1="{lx:.2}" y1="{ly:.2}" x2="{x2:.2}" y2="{ly:.2}" stroke="{c}" stroke-width="2"/>"#,
            x2 = lx + 20.0,
            c = escape(&style.line_color)
        ));
        lines.push(format!(
            r#"<text x="{x:.2}" y="{y:.2}" font-size="12">MTBF = {mtbf}</text>"#,
            x = lx + 26.0,
            y = ly + 4.0,
            mtbf = format_value(curve.mtbf())
        ));
    }

    lines.push("</svg>".to_string());
    let mut svg = lines.join("\n");
    svg.push('\n');
    Ok(svg)
}

/// Renders `curve` and writes the SVG document to `path`.
pub fn write_svg(path: impl AsRef<Path>, curve: &Curve, style: &PlotStyle) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_svg(curve, style)?)?;
    info!(path = %path.display(), points = curve.len(), "saved plot");
    Ok(())
}

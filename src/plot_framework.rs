// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::drawing::IntoDrawingArea;
use plotters::element::{Cross, PathElement};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::{Color, RGBColor};

use std::error::Error;
use std::fs;
use std::ops::Range;
use std::path::Path;

use crate::constants::{
    COLOR_REFERENCE_LINE, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND,
    LINE_WIDTH_LEGEND, LINE_WIDTH_REFERENCE, PLOT_HEIGHT, PLOT_WIDTH, PROPELLER_PALETTE,
};

// Dash patterns as alternating on/off lengths, in fractions of the plot diagonal.
const PATTERN_DASHED: &[f64] = &[0.012, 0.008];
const PATTERN_DASH_DOT: &[f64] = &[0.012, 0.006, 0.002, 0.006];
const PATTERN_DOTTED: &[f64] = &[0.002, 0.005];

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Palette color for the propeller at `index`, wrapping past the palette end.
pub fn propeller_color(index: usize) -> RGBColor {
    PROPELLER_PALETTE[index % PROPELLER_PALETTE.len()]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl LineStyle {
    fn pattern(self) -> Option<&'static [f64]> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some(PATTERN_DASHED),
            LineStyle::DashDot => Some(PATTERN_DASH_DOT),
            LineStyle::Dotted => Some(PATTERN_DOTTED),
        }
    }
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
    pub style: LineStyle,
    /// Size of an `x` marker drawn at every data point.
    pub marker_size: Option<u32>,
}

impl PlotSeries {
    pub fn line(data: Vec<(f64, f64)>, label: &str, color: RGBColor, stroke_width: u32) -> Self {
        Self {
            data,
            label: label.to_string(),
            color,
            stroke_width,
            style: LineStyle::Solid,
            marker_size: None,
        }
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_markers(mut self, size: u32) -> Self {
        self.marker_size = Some(size);
        self
    }
}

/// Dashed black line spanning the whole plot.
#[derive(Clone, Debug, PartialEq)]
pub enum ReferenceLine {
    Horizontal { y: f64, label: String },
    Vertical { x: f64, label: String },
}

#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    pub reference_lines: Vec<ReferenceLine>,
    pub legend_position: SeriesLabelPosition,
    pub grid: bool,
}

impl PlotConfig {
    /// Config whose ranges cover every series point and reference line, padded.
    pub fn fitted(title: &str, x_label: &str, y_label: &str, series: Vec<PlotSeries>, reference_lines: Vec<ReferenceLine>) -> Self {
        let (x_range, y_range) = data_ranges(&series, &reference_lines);
        Self {
            title: title.to_string(),
            x_range,
            y_range,
            series,
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            reference_lines,
            legend_position: SeriesLabelPosition::UpperLeft,
            grid: false,
        }
    }
}

/// Padded x and y ranges over all finite series points and reference lines.
pub fn data_ranges(series: &[PlotSeries], reference_lines: &[ReferenceLine]) -> (Range<f64>, Range<f64>) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for &(x, y) in series.iter().flat_map(|s| s.data.iter()) {
        if x.is_finite() && y.is_finite() {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    for line in reference_lines {
        match *line {
            ReferenceLine::Horizontal { y, .. } if y.is_finite() => {
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
            ReferenceLine::Vertical { x, .. } if x.is_finite() => {
                x_min = x_min.min(x);
                x_max = x_max.max(x);
            }
            _ => {}
        }
    }

    if x_min > x_max {
        (x_min, x_max) = (0.0, 1.0);
    }
    if y_min > y_max {
        (y_min, y_max) = (0.0, 1.0);
    }
    let (x0, x1) = calculate_range(x_min, x_max);
    let (y0, y1) = calculate_range(y_min, y_max);
    (x0..x1, y0..y1)
}

/// Splits a polyline into the "on" pieces of a dash pattern.
///
/// Lengths are measured after scaling x by `x_span` and y by `y_span`, so a
/// pattern looks the same whatever the data units. Non-finite points break the
/// line.
pub fn pattern_segments(data: &[(f64, f64)], x_span: f64, y_span: f64, pattern: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    if pattern.is_empty() || x_span <= 0.0 || y_span <= 0.0 {
        return segments;
    }

    let mut phase_idx = 0;
    let mut remaining = pattern[0];
    let mut current: Vec<(f64, f64)> = Vec::new();

    for pair in data.windows(2) {
        let (p0, p1) = (pair[0], pair[1]);
        if !(p0.0.is_finite() && p0.1.is_finite() && p1.0.is_finite() && p1.1.is_finite()) {
            if current.len() > 1 {
                segments.push(std::mem::take(&mut current));
            }
            current.clear();
            continue;
        }
        let dx = (p1.0 - p0.0) / x_span;
        let dy = (p1.1 - p0.1) / y_span;
        let total = (dx * dx + dy * dy).sqrt();
        let point_at = |travelled: f64| {
            if travelled >= total {
                p1
            } else {
                let t = travelled / total;
                (p0.0 + (p1.0 - p0.0) * t, p0.1 + (p1.1 - p0.1) * t)
            }
        };

        let mut travelled = 0.0;
        while travelled < total {
            let on = phase_idx % 2 == 0;
            if on && current.is_empty() {
                current.push(point_at(travelled));
            }
            let step = remaining.min(total - travelled);
            travelled += step;
            remaining -= step;
            if on {
                current.push(point_at(travelled));
            }

            if remaining <= 1e-12 {
                if on && current.len() > 1 {
                    segments.push(std::mem::take(&mut current));
                }
                current.clear();
                phase_idx = (phase_idx + 1) % pattern.len();
                remaining = pattern[phase_idx];
            }
        }
    }
    if current.len() > 1 {
        segments.push(current);
    }
    segments
}

/// Draws one chart into a PNG file at `output_path`.
pub fn draw_single_chart(output_path: &Path, plot_config: &PlotConfig) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let root_area = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let x_range = plot_config.x_range.clone();
    let y_range = plot_config.y_range.clone();
    let x_span = x_range.end - x_range.start;
    let y_span = y_range.end - y_range.start;

    let mut chart = ChartBuilder::on(&root_area)
        .caption(&plot_config.title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(10)
        .y_labels(10)
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL));
    if plot_config.grid {
        mesh.bold_line_style(BLACK.mix(0.2)).light_line_style(WHITE.mix(0.0));
    } else {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    let mut legend_series_count = 0;

    for s in &plot_config.series {
        if s.data.is_empty() {
            continue;
        }
        let style = s.color.stroke_width(s.stroke_width);
        let pieces = match s.style.pattern() {
            None => vec![s.data.clone()],
            Some(pattern) => pattern_segments(&s.data, x_span, y_span, pattern),
        };

        // The legend entry attaches to the first piece only.
        for (piece_idx, piece) in pieces.into_iter().enumerate() {
            let drawn = chart.draw_series(LineSeries::new(piece, style))?;
            if piece_idx == 0 && !s.label.is_empty() {
                let color = s.color;
                drawn.label(&s.label).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND))
                });
                legend_series_count += 1;
            }
        }

        if let Some(size) = s.marker_size {
            chart.draw_series(
                s.data
                    .iter()
                    .filter(|(x, y)| x.is_finite() && y.is_finite())
                    .map(|&point| Cross::new(point, size, style)),
            )?;
        }
    }

    let reference_style = COLOR_REFERENCE_LINE.stroke_width(LINE_WIDTH_REFERENCE);
    for line in &plot_config.reference_lines {
        let (points, label) = match line {
            ReferenceLine::Horizontal { y, label } => (vec![(x_range.start, *y), (x_range.end, *y)], label),
            ReferenceLine::Vertical { x, label } => (vec![(*x, y_range.start), (*x, y_range.end)], label),
        };
        for (piece_idx, piece) in pattern_segments(&points, x_span, y_span, PATTERN_DASHED).into_iter().enumerate() {
            let drawn = chart.draw_series(LineSeries::new(piece, reference_style))?;
            if piece_idx == 0 && !label.is_empty() {
                drawn.label(label).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], COLOR_REFERENCE_LINE.stroke_width(LINE_WIDTH_LEGEND))
                });
                legend_series_count += 1;
            }
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(plot_config.legend_position.clone())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()?;
    }

    root_area.present()?;
    println!("  Plot saved as '{}'.", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_range_pads() {
        assert_eq!(calculate_range(0.0, 10.0), (-1.5, 11.5));
        assert_eq!(calculate_range(5.0, 5.0), (4.5, 5.5));
        assert_eq!(calculate_range(10.0, 0.0), (-1.5, 11.5));
    }

    #[test]
    fn test_propeller_color_cycles() {
        assert_eq!(propeller_color(0), propeller_color(8));
        assert_eq!(propeller_color(3), RGBColor(0xe7, 0x29, 0x8a));
        assert_ne!(propeller_color(0), propeller_color(1));
    }

    #[test]
    fn test_data_ranges_include_reference_lines() {
        let series = vec![PlotSeries::line(vec![(0.0, 0.0), (1.0, 100.0)], "a", RGBColor(0, 0, 0), 1)];
        let refs = vec![ReferenceLine::Horizontal { y: 200.0, label: "hover".into() }];
        let (x, y) = data_ranges(&series, &refs);
        assert_eq!((x.start, x.end), (-0.15, 1.15));
        assert_eq!((y.start, y.end), (-30.0, 230.0));
    }

    #[test]
    fn test_data_ranges_skip_nan_and_default_when_empty() {
        let series = vec![PlotSeries::line(vec![(f64::NAN, 1.0), (2.0, 4.0)], "", RGBColor(0, 0, 0), 1)];
        let (x, y) = data_ranges(&series, &[]);
        assert_eq!((x.start, x.end), (1.5, 2.5));
        assert_eq!((y.start, y.end), (3.5, 4.5));

        let (x, _) = data_ranges(&[], &[]);
        assert_eq!((x.start, x.end), (-0.15, 1.15));
    }

    #[test]
    fn test_pattern_segments_dashes_a_line() {
        // Unit-length horizontal line, pattern of 0.25 on / 0.25 off.
        let segments = pattern_segments(&[(0.0, 0.0), (1.0, 0.0)], 1.0, 1.0, &[0.25, 0.25]);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], vec![(0.0, 0.0), (0.25, 0.0)]);
        assert_eq!(segments[1], vec![(0.5, 0.0), (0.75, 0.0)]);
    }

    #[test]
    fn test_pattern_segments_follow_corners() {
        // The first dash turns the corner at (0.2, 0).
        let segments = pattern_segments(&[(0.0, 0.0), (0.2, 0.0), (0.2, 1.0)], 1.0, 1.0, &[0.3, 0.1]);
        let first = &segments[0];
        assert_eq!(first[0], (0.0, 0.0));
        assert_eq!(first[1], (0.2, 0.0));
        let end = first[first.len() - 1];
        assert!((end.0 - 0.2).abs() < 1e-12 && (end.1 - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_pattern_segments_scale_by_span() {
        // In data units the line is 10 long, but the span is also 10.
        let segments = pattern_segments(&[(0.0, 0.0), (10.0, 0.0)], 10.0, 1.0, &[0.5, 0.5]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0], vec![(0.0, 0.0), (5.0, 0.0)]);
    }

    #[test]
    fn test_draw_single_chart_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chart.png");
        let series = vec![
            PlotSeries::line(vec![(0.0, 0.0), (0.5, 2.0), (1.0, 3.0)], "prop", RGBColor(0x1b, 0x9e, 0x77), 2),
            PlotSeries::line(vec![(0.0, 0.1), (1.0, 3.1)], "", RGBColor(0x1b, 0x9e, 0x77), 2)
                .with_style(LineStyle::DashDot)
                .with_markers(3),
        ];
        let refs = vec![ReferenceLine::Vertical { x: 0.4, label: "hover".into() }];
        let config = PlotConfig::fitted("Title", "x", "y", series, refs);
        draw_single_chart(&path, &config).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }
}

// src/plot_framework.rs

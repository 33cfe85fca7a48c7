//! Static Chart Renderer
//! Draws the whole figure to a PNG or SVG file with plotters.
//!
//! Layout matches the interactive viewer: the drawing area is split evenly
//! into the figure's grid, and each cell gets a caption, labelled mesh, the
//! three series and a legend box.

use crate::charts::figure::{Axis, Figure, LineKind, SeriesKind};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unsupported export format {0:?} (use .png or .svg)")]
    UnsupportedFormat(String),
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

// Series colors (matches the egui palette)
const SERIES_COLORS: [RGBColor; 3] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
];

const MARKER_SIZE: u32 = 3;
const STROKE_WIDTH: u32 = 2;

fn drawing_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `figure` to `path`. The backend is picked from the extension.
    pub fn export(figure: &Figure, path: &Path, size: (u32, u32)) -> Result<(), RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "png" => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                Self::draw_figure(&root, figure)?;
                root.present().map_err(drawing_err)?;
            }
            "svg" => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                Self::draw_figure(&root, figure)?;
                root.present().map_err(drawing_err)?;
            }
            other => return Err(RenderError::UnsupportedFormat(other.to_string())),
        }

        info!("Exported {} charts to {}", figure.axes.len(), path.display());
        Ok(())
    }

    /// Fill `root` with the figure grid.
    pub fn draw_figure<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        figure: &Figure,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(drawing_err)?;

        let panels = root.split_evenly((figure.rows, figure.cols));
        for axis in &figure.axes {
            if let Some(panel) = panels.get(axis.row * figure.cols + axis.col) {
                Self::draw_axis(panel, axis)?;
            }
        }
        Ok(())
    }

    fn draw_axis<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        axis: &Axis,
    ) -> Result<(), RenderError> {
        let (x_range, y_range) = Self::axis_ranges(axis);

        let mut chart = ChartBuilder::on(area)
            .caption(&axis.title, ("sans-serif", 18).into_font())
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(55)
            .build_cartesian_2d(x_range, y_range)
            .map_err(drawing_err)?;

        chart
            .configure_mesh()
            .x_desc(axis.x_label.as_str())
            .y_desc(axis.y_label.as_str())
            .x_labels(5)
            .y_labels(6)
            .draw()
            .map_err(drawing_err)?;

        for series in &axis.series {
            let color = Self::series_color(series.kind);
            let style = color.stroke_width(STROKE_WIDTH);
            let points: Vec<(f64, f64)> = series.points.iter().map(|p| (p[0], p[1])).collect();

            let annotation = match series.kind.line_kind() {
                LineKind::Solid => chart
                    .draw_series(LineSeries::new(points.iter().copied(), style))
                    .map_err(drawing_err)?,
                LineKind::Dashed => chart
                    .draw_series(DashedLineSeries::new(points.iter().copied(), 8, 4, style))
                    .map_err(drawing_err)?,
                LineKind::Dotted => chart
                    .draw_series(DashedLineSeries::new(points.iter().copied(), 2, 3, style))
                    .map_err(drawing_err)?,
            };
            annotation
                .label(series.name.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(STROKE_WIDTH))
                });

            if series.kind.has_marker() {
                chart
                    .draw_series(
                        points
                            .iter()
                            .map(|&(x, y)| Circle::new((x, y), MARKER_SIZE, color.filled())),
                    )
                    .map_err(drawing_err)?;
            }
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()
            .map_err(drawing_err)?;

        Ok(())
    }

    fn series_color(kind: SeriesKind) -> RGBColor {
        SERIES_COLORS[kind.index() % SERIES_COLORS.len()]
    }

    /// Data ranges with a little headroom. Empty axes fall back to `0..1`.
    pub fn axis_ranges(axis: &Axis) -> (Range<f64>, Range<f64>) {
        match axis.bounds() {
            Some((x, y)) => (Self::padded(x[0], x[1]), Self::padded(y[0], y[1])),
            None => (0.0..1.0, 0.0..1.0),
        }
    }

    fn padded(min: f64, max: f64) -> Range<f64> {
        let span = max - min;
        if span <= 0.0 {
            let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.05 };
            return (min - pad)..(max + pad);
        }
        let pad = span * 0.05;
        (min - pad)..(max + pad)
    }
}

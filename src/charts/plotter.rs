//! Chart Plotter Module
//! Draws one figure axis as an interactive egui_plot chart.

use crate::charts::figure::{Axis, LineKind, SeriesKind};
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, LineStyle, MarkerShape, Plot, PlotPoints, Points};

/// Series colors, indexed by `SeriesKind::index`.
pub const PALETTE: [Color32; 3] = [
    Color32::from_rgb(31, 119, 180), // Blue
    Color32::from_rgb(255, 127, 14), // Orange
    Color32::from_rgb(44, 160, 44),  // Green
];

const MARKER_RADIUS: f32 = 3.0;
const LINE_WIDTH: f32 = 1.5;

/// Draws figure axes with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn series_color(kind: SeriesKind) -> Color32 {
        PALETTE[kind.index() % PALETTE.len()]
    }

    pub fn line_style(kind: LineKind) -> LineStyle {
        match kind {
            LineKind::Solid => LineStyle::Solid,
            LineKind::Dashed => LineStyle::dashed_loose(),
            LineKind::Dotted => LineStyle::dotted_dense(),
        }
    }

    /// Draw an axis: title, three series with markers, labels and legend.
    pub fn draw_axis(ui: &mut egui::Ui, axis: &Axis, height: f32) {
        ui.label(RichText::new(&axis.title).size(14.0).strong());

        Plot::new(format!("axis_{}_{}", axis.row, axis.col))
            .height(height)
            .legend(Legend::default())
            .x_axis_label(axis.x_label.clone())
            .y_axis_label(axis.y_label.clone())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for series in &axis.series {
                    let color = Self::series_color(series.kind);
                    let points: PlotPoints = series.points.iter().copied().collect();

                    plot_ui.line(
                        Line::new(points)
                            .color(color)
                            .width(LINE_WIDTH)
                            .style(Self::line_style(series.kind.line_kind()))
                            .name(&series.name),
                    );

                    if series.kind.has_marker() {
                        let markers: PlotPoints = series.points.iter().copied().collect();
                        plot_ui.points(
                            Points::new(markers)
                                .shape(MarkerShape::Circle)
                                .filled(true)
                                .radius(MARKER_RADIUS)
                                .color(color)
                                .name(&series.name),
                        );
                    }
                }
            });
    }
}

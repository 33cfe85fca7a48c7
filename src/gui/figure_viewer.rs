//! Figure Viewer Widget
//! Lays the figure's axes out as a fixed rows x cols grid of chart cards.

use crate::charts::{Axis, ChartPlotter, Figure};
use egui::{RichText, ScrollArea};

const CHART_SPACING: f32 = 10.0;
const MIN_CARD_WIDTH: f32 = 260.0;
const MIN_PLOT_HEIGHT: f32 = 220.0;
// Title label plus card margins
const CARD_CHROME: f32 = 60.0;

/// Shows every axis of a figure in its grid cell.
pub struct FigureViewer {
    figure: Figure,
}

impl FigureViewer {
    pub fn new(figure: Figure) -> Self {
        Self { figure }
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Card width and plot height for the available space.
    fn cell_size(&self, avail: egui::Vec2) -> (f32, f32) {
        let cols = self.figure.cols.max(1) as f32;
        let rows = self.figure.rows.max(1) as f32;

        let card_width = ((avail.x - CHART_SPACING * cols) / cols).max(MIN_CARD_WIDTH);
        let plot_height =
            ((avail.y - CHART_SPACING * rows) / rows - CARD_CHROME).max(MIN_PLOT_HEIGHT);
        (card_width, plot_height)
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        if self.figure.axes.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        let (card_width, plot_height) = self.cell_size(ui.available_size());

        ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
            for row in 0..self.figure.rows {
                ui.horizontal(|ui| {
                    for col in 0..self.figure.cols {
                        ui.vertical(|ui| {
                            ui.set_width(card_width);
                            match self.figure.axis_at(row, col) {
                                Some(axis) => Self::draw_card(ui, axis, plot_height),
                                None => {
                                    ui.add_space(plot_height);
                                }
                            }
                        });
                        ui.add_space(CHART_SPACING);
                    }
                });
                ui.add_space(CHART_SPACING);
            }
        });
    }

    fn draw_card(ui: &mut egui::Ui, axis: &Axis, plot_height: f32) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ChartPlotter::draw_axis(ui, axis, plot_height);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(rows: usize, cols: usize) -> FigureViewer {
        FigureViewer::new(Figure {
            rows,
            cols,
            axes: Vec::new(),
        })
    }

    #[test]
    fn cells_split_available_space() {
        let (w, h) = viewer(2, 4).cell_size(egui::vec2(1640.0, 1000.0));
        assert_eq!(w, 400.0);
        assert_eq!(h, 1000.0 / 2.0 - CHART_SPACING - CARD_CHROME);
    }

    #[test]
    fn cells_never_shrink_below_minimum() {
        let (w, h) = viewer(2, 4).cell_size(egui::vec2(300.0, 200.0));
        assert_eq!(w, MIN_CARD_WIDTH);
        assert_eq!(h, MIN_PLOT_HEIGHT);
    }
}

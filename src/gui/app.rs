//! Sieve Charts Main Application
//! Window with a report header and the figure grid.

use crate::charts::Figure;
use crate::gui::FigureViewer;
use egui::{RichText, TopBottomPanel};
use std::path::PathBuf;

/// Summary line shown above the charts.
pub struct ReportInfo {
    pub source: PathBuf,
    pub row_count: usize,
}

/// Main application window.
pub struct SieveChartsApp {
    info: ReportInfo,
    viewer: FigureViewer,
}

impl SieveChartsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, figure: Figure, info: ReportInfo) -> Self {
        Self {
            info,
            viewer: FigureViewer::new(figure),
        }
    }

    fn header_text(&self) -> String {
        format!(
            "{}  ·  {} rows  ·  {} charts",
            self.info.source.display(),
            self.info.row_count,
            self.viewer.figure().axes.len()
        )
    }
}

impl eframe::App for SieveChartsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("report_header").show(ctx, |ui| {
            ui.label(RichText::new(self.header_text()).size(13.0));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.viewer.show(ui);
        });
    }
}

//! GUI module - User interface components

mod app;
mod figure_viewer;

pub use app::{ReportInfo, SieveChartsApp};
pub use figure_viewer::FigureViewer;

//! Charts module - Figure model and chart rendering

mod figure;
mod layout;
mod plotter;
mod renderer;

pub use figure::{Axis, Figure};
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;

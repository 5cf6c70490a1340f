//! Charts module - Chart rendering

mod plotter;
mod renderer;
mod samples;

pub use plotter::{ChartPlotter, ScatterData};
pub use renderer::StaticChartRenderer;
pub use samples::SampleFrame;

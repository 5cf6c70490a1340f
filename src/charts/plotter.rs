//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::charts::SampleFrame;
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};
use polars::prelude::*;
use thiserror::Error;

pub const SCATTER_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Column not found: {0}")]
    MissingColumn(String),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Points of a two-column scatter plot.
#[derive(Debug, Clone, Default)]
pub struct ScatterData {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<[f64; 2]>,
}

impl ScatterData {
    /// Pair up `x` and `y`, dropping rows where either value is missing or not finite.
    pub fn from_frame(df: &DataFrame, x: &str, y: &str) -> Result<Self, PlotError> {
        let xs = df
            .column(x)
            .map_err(|_| PlotError::MissingColumn(x.to_string()))?
            .cast(&DataType::Float64)?;
        let ys = df
            .column(y)
            .map_err(|_| PlotError::MissingColumn(y.to_string()))?
            .cast(&DataType::Float64)?;

        let points = xs
            .f64()?
            .into_iter()
            .zip(ys.f64()?.into_iter())
            .filter_map(|pair| match pair {
                (Some(a), Some(b)) if a.is_finite() && b.is_finite() => Some([a, b]),
                _ => None,
            })
            .collect();

        Ok(Self {
            x_label: x.to_string(),
            y_label: y.to_string(),
            points,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

pub fn series_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

/// Creates the interactive charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Scatter plot of two numeric columns.
    pub fn draw_scatter(ui: &mut egui::Ui, id: &str, data: &ScatterData, height: f32) {
        Plot::new(id)
            .height(height)
            .x_axis_label(data.x_label.clone())
            .y_axis_label(data.y_label.clone())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(PlotPoints::from(data.points.clone()))
                        .radius(3.0)
                        .color(SCATTER_COLOR.gamma_multiply(0.8))
                        .name(format!("{} vs {}", data.y_label, data.x_label)),
                );
            });
    }

    fn indexed(values: &[f64]) -> PlotPoints {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, v])
            .collect()
    }

    /// One line per column over the row index.
    pub fn draw_line_chart(ui: &mut egui::Ui, id: &str, frame: &SampleFrame, height: f32) {
        Plot::new(id)
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (i, (name, values)) in frame.columns.iter().zip(&frame.values).enumerate() {
                    plot_ui.line(
                        Line::new(Self::indexed(values))
                            .color(series_color(i))
                            .width(1.5)
                            .name(name),
                    );
                }
            });
    }

    /// Grouped bars, one bar per column at each row index.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, frame: &SampleFrame, height: f32) {
        let n = frame.columns.len().max(1) as f64;
        let bar_width = 0.8 / n;

        Plot::new(id)
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (i, (name, values)) in frame.columns.iter().zip(&frame.values).enumerate() {
                    let offset = (i as f64 - (n - 1.0) / 2.0) * bar_width;
                    let bars = values
                        .iter()
                        .enumerate()
                        .map(|(row, &v)| Bar::new(row as f64 + offset, v).width(bar_width))
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).color(series_color(i)).name(name));
                }
            });
    }

    /// Lines filled down to zero.
    pub fn draw_area_chart(ui: &mut egui::Ui, id: &str, frame: &SampleFrame, height: f32) {
        Plot::new(id)
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (i, (name, values)) in frame.columns.iter().zip(&frame.values).enumerate() {
                    plot_ui.line(
                        Line::new(Self::indexed(values))
                            .color(series_color(i))
                            .fill(0.0)
                            .name(name),
                    );
                }
            });
    }

    /// Longitude/latitude points on equal-aspect axes.
    pub fn draw_map(ui: &mut egui::Ui, id: &str, points: &[[f64; 2]], height: f32) {
        Plot::new(id)
            .height(height)
            .data_aspect(1.0)
            .x_axis_label("lon")
            .y_axis_label("lat")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(PlotPoints::from(points.to_vec()))
                        .radius(2.5)
                        .color(PALETTE[0]),
                );
            });
    }
}

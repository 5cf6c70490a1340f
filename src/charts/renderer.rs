//! Static Chart Renderer
//! Writes the scatter plot to a PNG file with plotters.

use crate::charts::ScatterData;
use anyhow::{bail, Context};
use plotters::prelude::*;
use std::path::Path;

const POINT_COLOR: RGBColor = RGBColor(52, 152, 219);

/// Min/max of `values`, widened so a constant series still spans an axis.
pub fn padded_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values.fold(None, |acc: Option<(f64, f64)>, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })?;

    if min == max {
        return Some((min - 0.5, max + 0.5));
    }
    let pad = (max - min) * 0.05;
    Some((min - pad, max + pad))
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `data` as a PNG of `width` x `height` pixels at `path`.
    pub fn render_scatter_png(
        data: &ScatterData,
        path: &Path,
        width: u32,
        height: u32,
    ) -> anyhow::Result<()> {
        let (Some(x_range), Some(y_range)) = (
            padded_range(data.points.iter().map(|p| p[0])),
            padded_range(data.points.iter().map(|p| p[1])),
        ) else {
            bail!("No points to render");
        };

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{} vs {}", data.y_label, data.x_label),
                ("sans-serif", 28),
            )
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

        chart
            .configure_mesh()
            .x_desc(data.x_label.as_str())
            .y_desc(data.y_label.as_str())
            .draw()?;

        chart.draw_series(
            data.points
                .iter()
                .map(|p| Circle::new((p[0], p[1]), 3, POINT_COLOR.mix(0.7).filled())),
        )?;

        root.present()
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!(
            "Exported {} points to {}",
            data.points.len(),
            path.display()
        );
        Ok(())
    }
}

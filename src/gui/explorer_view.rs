//! Explorer View
//! Central panel: overview metrics, raw data, statistics and the scatter plot.

use crate::charts::{ChartPlotter, ScatterData};
use crate::data::{DataLoader, Overview};
use crate::gui::{table, widgets};
use crate::stats::{Describe, StatsCalculator};
use egui::{ComboBox, RichText, ScrollArea};

const SECTION_SPACING: f32 = 18.0;
const TABLE_HEIGHT: f32 = 320.0;
const PLOT_HEIGHT: f32 = 420.0;

/// X/Y column choice for the scatter plot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisSelection {
    pub x: String,
    pub y: String,
}

impl AxisSelection {
    /// Keep current choices that still exist; otherwise fall back to the
    /// first numeric column for X and the second for Y.
    /// Returns whether anything changed.
    pub fn reconcile(&mut self, numeric: &[String]) -> bool {
        let before = self.clone();
        if !numeric.contains(&self.x) {
            self.x = numeric.first().cloned().unwrap_or_default();
        }
        if !numeric.contains(&self.y) {
            self.y = numeric.get(1).cloned().unwrap_or_default();
        }
        *self != before
    }
}

/// Actions triggered by the explorer view
#[derive(Debug, Clone, PartialEq)]
pub enum ExplorerAction {
    None,
    ExportPng,
}

/// Derived views of the current DataFrame, rebuilt once per load.
#[derive(Default)]
pub struct ExplorerView {
    overview: Option<Overview>,
    describe: Option<Result<Describe, String>>,
    pub axes: AxisSelection,
    pub scatter: Option<Result<ScatterData, String>>,
}

impl ExplorerView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Recompute everything derived from the loader's frame.
    pub fn set_data(&mut self, loader: &DataLoader) {
        let Some(df) = loader.dataframe() else {
            self.clear();
            return;
        };

        self.overview = Some(Overview::of(df));
        self.describe = Some(StatsCalculator::describe(df).map_err(|e| {
            log::warn!("Describe failed: {}", e);
            e.to_string()
        }));
        self.axes.reconcile(loader.numeric_columns());
        self.update_scatter(loader);
    }

    fn update_scatter(&mut self, loader: &DataLoader) {
        self.scatter = match loader.dataframe() {
            Some(df) if loader.numeric_columns().len() >= 2 => Some(
                ScatterData::from_frame(df, &self.axes.x, &self.axes.y).map_err(|e| e.to_string()),
            ),
            _ => None,
        };
    }

    /// Draw the explorer
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        loader: &DataLoader,
        preview_rows: Option<usize>,
    ) -> ExplorerAction {
        let mut action = ExplorerAction::None;

        ui.heading(RichText::new("📊 Data Explorer").size(26.0));
        ui.label("Upload a CSV file and explore your data interactively!");
        ui.add_space(SECTION_SPACING);

        let (Some(df), Some(overview)) = (loader.dataframe(), self.overview) else {
            widgets::info(ui, "👆 Upload a CSV file to get started!");
            return action;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                // ===== Dataset Overview =====
                ui.label(RichText::new("Dataset Overview").size(18.0).strong());
                ui.add_space(6.0);
                ui.columns(3, |cols| {
                    widgets::metric(&mut cols[0], "Rows", &overview.rows.to_string(), None);
                    widgets::metric(&mut cols[1], "Columns", &overview.columns.to_string(), None);
                    widgets::metric(&mut cols[2], "Memory", &overview.memory_label(), None);
                });
                ui.add_space(SECTION_SPACING);

                // ===== Raw Data =====
                ui.label(RichText::new("Raw Data").size(18.0).strong());
                ui.add_space(6.0);
                table::show_dataframe(ui, "raw_data", df, preview_rows, TABLE_HEIGHT);
                ui.add_space(SECTION_SPACING);

                // ===== Statistics =====
                ui.label(RichText::new("Statistics").size(18.0).strong());
                ui.add_space(6.0);
                match &self.describe {
                    Some(Ok(describe)) => table::show_describe(ui, "describe", describe),
                    Some(Err(e)) => widgets::error(ui, e),
                    None => {}
                }
                ui.add_space(SECTION_SPACING);

                // ===== Visualization =====
                ui.label(RichText::new("Visualization").size(18.0).strong());
                ui.add_space(6.0);

                let numeric = loader.numeric_columns();
                if numeric.len() < 2 {
                    widgets::info(
                        ui,
                        "A scatter plot needs at least two numeric columns.",
                    );
                    return;
                }

                let mut changed = false;
                ui.columns(2, |cols| {
                    changed |= Self::axis_combo(&mut cols[0], "X-axis", &mut self.axes.x, numeric);
                    changed |= Self::axis_combo(&mut cols[1], "Y-axis", &mut self.axes.y, numeric);
                });
                if changed {
                    log::debug!("Scatter axes changed to {} / {}", self.axes.x, self.axes.y);
                    self.update_scatter(loader);
                }

                ui.add_space(6.0);
                match &self.scatter {
                    Some(Ok(data)) => {
                        ChartPlotter::draw_scatter(ui, "explorer_scatter", data, PLOT_HEIGHT);
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(format!("{} points", data.points.len()))
                                    .size(11.0)
                                    .weak(),
                            );
                            ui.add_enabled_ui(!data.is_empty(), |ui| {
                                if ui.button("🖼 Export PNG").clicked() {
                                    action = ExplorerAction::ExportPng;
                                }
                            });
                        });
                    }
                    Some(Err(e)) => widgets::error(ui, e),
                    None => {}
                }
            });

        action
    }

    fn axis_combo(ui: &mut egui::Ui, label: &str, selected: &mut String, options: &[String]) -> bool {
        let mut changed = false;
        ui.label(label);
        ComboBox::from_id_salt(label)
            .width(ui.available_width())
            .selected_text(selected.as_str())
            .show_ui(ui, |ui| {
                for option in options {
                    if ui
                        .selectable_label(*selected == *option, option)
                        .clicked()
                        && *selected != *option
                    {
                        *selected = option.clone();
                        changed = true;
                    }
                }
            });
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use std::path::PathBuf;

    fn names(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_first_two_numeric_columns() {
        let mut axes = AxisSelection::default();
        assert!(axes.reconcile(&names(&["a", "b", "c"])));
        assert_eq!(axes.x, "a");
        assert_eq!(axes.y, "b");
    }

    #[test]
    fn keeps_valid_choices() {
        let mut axes = AxisSelection {
            x: "c".to_string(),
            y: "a".to_string(),
        };
        assert!(!axes.reconcile(&names(&["a", "b", "c"])));
        assert_eq!(axes.x, "c");
        assert_eq!(axes.y, "a");
    }

    #[test]
    fn repairs_vanished_columns() {
        let mut axes = AxisSelection {
            x: "old".to_string(),
            y: "b".to_string(),
        };
        axes.reconcile(&names(&["b", "z"]));
        assert_eq!(axes.x, "b");
        assert_eq!(axes.y, "b");
    }

    #[test]
    fn single_numeric_column_leaves_y_empty() {
        let mut axes = AxisSelection::default();
        axes.reconcile(&names(&["only"]));
        assert_eq!(axes.x, "only");
        assert_eq!(axes.y, "");
    }

    #[test]
    fn set_data_builds_scatter_for_numeric_frames() {
        let df = DataFrame::new(vec![
            Column::new("label".into(), vec!["p", "q", "r"]),
            Column::new("x".into(), vec![1.0f64, 2.0, 3.0]),
            Column::new("y".into(), vec![4i64, 5, 6]),
        ])
        .unwrap();
        let mut loader = DataLoader::new();
        loader.set_dataframe(PathBuf::from("mem.csv"), df);

        let mut view = ExplorerView::new();
        view.set_data(&loader);
        assert_eq!(view.overview.map(|o| o.rows), Some(3));
        assert!(matches!(view.describe, Some(Ok(Describe::Numeric(_)))));
        let scatter = view.scatter.unwrap().unwrap();
        assert_eq!(scatter.points.len(), 3);
        assert_eq!((scatter.x_label.as_str(), scatter.y_label.as_str()), ("x", "y"));
    }

    #[test]
    fn set_data_without_two_numeric_columns_has_no_scatter() {
        let df = DataFrame::new(vec![
            Column::new("label".into(), vec!["p", "q"]),
            Column::new("x".into(), vec![1.0f64, 2.0]),
        ])
        .unwrap();
        let mut loader = DataLoader::new();
        loader.set_dataframe(PathBuf::from("mem.csv"), df);

        let mut view = ExplorerView::new();
        view.set_data(&loader);
        assert!(view.scatter.is_none());
    }
}

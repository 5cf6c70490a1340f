//! DataFrame and describe tables.

use crate::stats::Describe;
use egui::RichText;
use egui_extras::{Column, TableBuilder};
use polars::prelude::*;

const ROW_HEIGHT: f32 = 18.0;

/// Display text for one cell; strings lose their quotes, nulls show as `None`.
pub fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => "None".to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Scrollable, striped table of the first `max_rows` rows (all when `None`).
pub fn show_dataframe(
    ui: &mut egui::Ui,
    id: &str,
    df: &DataFrame,
    max_rows: Option<usize>,
    max_height: f32,
) {
    let nr_rows = max_rows.map_or(df.height(), |m| m.min(df.height()));
    let columns = df.get_columns();

    ui.push_id(id, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(max_height)
            .column(Column::auto())
            .columns(Column::auto().at_least(60.0).clip(true), columns.len())
            .header(22.0, |mut header| {
                header.col(|ui| {
                    ui.label(RichText::new("").strong());
                });
                for col in columns {
                    header.col(|ui| {
                        ui.label(RichText::new(col.name().as_str()).strong());
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, nr_rows, |mut row| {
                    let row_index = row.index();
                    row.col(|ui| {
                        ui.label(RichText::new(row_index.to_string()).weak());
                    });
                    for col in columns {
                        row.col(|ui| {
                            if let Ok(value) = col.get(row_index) {
                                ui.label(cell_text(&value));
                            }
                        });
                    }
                });
            });
    });

    if nr_rows < df.height() {
        ui.label(
            RichText::new(format!("Showing {} of {} rows", nr_rows, df.height()))
                .size(11.0)
                .weak(),
        );
    }
}

/// Non-scrolling grid of every row, like a printed table.
pub fn show_static_table(ui: &mut egui::Ui, id: &str, df: &DataFrame) {
    egui::Grid::new(id).striped(true).show(ui, |ui| {
        ui.label("");
        for col in df.get_columns() {
            ui.label(RichText::new(col.name().as_str()).strong());
        }
        ui.end_row();

        for row_index in 0..df.height() {
            ui.label(RichText::new(row_index.to_string()).weak());
            for col in df.get_columns() {
                let text = col
                    .get(row_index)
                    .map(|v| cell_text(&v))
                    .unwrap_or_default();
                ui.label(text);
            }
            ui.end_row();
        }
    });
}

/// Statistics table: one row per statistic, one column per summarised column.
pub fn show_describe(ui: &mut egui::Ui, id: &str, describe: &Describe) {
    let names = describe.column_names();

    egui::Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(5.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            egui::ScrollArea::horizontal().id_salt(id).show(ui, |ui| {
                egui::Grid::new(format!("{}_grid", id))
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("");
                        for name in &names {
                            ui.label(RichText::new(*name).strong());
                        }
                        ui.end_row();

                        for (row, label) in describe.row_labels().iter().enumerate() {
                            ui.label(RichText::new(*label).strong());
                            for column in 0..names.len() {
                                ui.label(describe.cell(row, column).unwrap_or_default());
                            }
                            ui.end_row();
                        }
                    });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_text_strips_quotes_and_names_nulls() {
        assert_eq!(cell_text(&AnyValue::String("Alice")), "Alice");
        assert_eq!(cell_text(&AnyValue::Null), "None");
        assert_eq!(cell_text(&AnyValue::Int64(42)), "42");
    }
}

//! Widget Gallery
//! One collapsible section per kind of widget: text, data display, inputs,
//! charts, layout, caching and session state.

use crate::charts::{ChartPlotter, SampleFrame, ScatterData};
use crate::data::CacheStats;
use crate::gui::session::{GalleryInputs, SessionState};
use crate::gui::{table, widgets};
use egui::{CollapsingHeader, ComboBox, RichText, ScrollArea};
use polars::prelude::*;

const SELECT_OPTIONS: [&str; 3] = ["A", "B", "C"];
const MULTI_OPTIONS: [&str; 3] = ["Option 1", "Option 2", "Option 3"];
const RADIO_OPTIONS: [&str; 2] = ["Option A", "Option B"];
const LAYOUT_TABS: [&str; 3] = ["Tab 1", "Tab 2", "Tab 3"];
const CHART_HEIGHT: f32 = 220.0;
const MAP_CENTER: (f64, f64) = (37.76, -122.4);

/// Actions triggered by the gallery
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryAction {
    None,
    ClearCache,
}

pub struct WidgetGallery {
    people: Option<DataFrame>,
    chart_data: SampleFrame,
    map_points: Vec<[f64; 2]>,
    scatter: ScatterData,
}

impl Default for WidgetGallery {
    fn default() -> Self {
        Self::new(rand::random())
    }
}

impl WidgetGallery {
    pub fn new(seed: u64) -> Self {
        let people = df!(
            "Name" => ["Alice", "Bob", "Charlie"],
            "Age" => [25i64, 30, 35],
            "Score" => [85i64, 92, 78]
        )
        .map_err(|e| log::warn!("Failed to build demo table: {}", e))
        .ok();

        let chart_data = SampleFrame::random(20, 3, seed);
        let scatter = ScatterData {
            x_label: "A".to_string(),
            y_label: "B".to_string(),
            points: chart_data
                .column("A")
                .into_iter()
                .flatten()
                .zip(chart_data.column("B").into_iter().flatten())
                .map(|(&a, &b)| [a, b])
                .collect(),
        };

        Self {
            people,
            map_points: SampleFrame::map_points(100, MAP_CENTER, seed.wrapping_add(1)),
            chart_data,
            scatter,
        }
    }

    /// Sidebar content shown while the gallery is active.
    pub fn show_sidebar(&self, ui: &mut egui::Ui, inputs: &mut GalleryInputs) {
        ui.label(RichText::new("Sidebar").size(22.0).strong());
        ui.label("This is in the sidebar");
        ui.add_space(8.0);
        ComboBox::from_label("Choose")
            .selected_text(inputs.sidebar_option.as_str())
            .show_ui(ui, |ui| {
                for option in SELECT_OPTIONS {
                    ui.selectable_value(&mut inputs.sidebar_option, option.to_string(), option);
                }
            });
    }

    pub fn show(
        &self,
        ui: &mut egui::Ui,
        session: &mut SessionState,
        cache: CacheStats,
    ) -> GalleryAction {
        let mut action = GalleryAction::None;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new("🧩 Widget Gallery").size(26.0));
                ui.add_space(10.0);

                CollapsingHeader::new("Text elements")
                    .default_open(true)
                    .show(ui, |ui| Self::text_section(ui, &mut session.gallery));

                CollapsingHeader::new("Data display").show(ui, |ui| self.data_section(ui));

                CollapsingHeader::new("Inputs").show(ui, |ui| Self::input_section(ui, &mut session.gallery));

                CollapsingHeader::new("Charts").show(ui, |ui| self.chart_section(ui));

                CollapsingHeader::new("Layout")
                    .show(ui, |ui| Self::layout_section(ui, &mut session.gallery));

                CollapsingHeader::new("Caching").show(ui, |ui| {
                    ui.label("Loaded CSV files are parsed once and reused until the file changes on disk.");
                    ui.add_space(4.0);
                    ui.columns(3, |cols| {
                        widgets::metric(&mut cols[0], "Cached files", &cache.entries.to_string(), None);
                        widgets::metric(&mut cols[1], "Hits", &cache.hits.to_string(), None);
                        widgets::metric(&mut cols[2], "Misses", &cache.misses.to_string(), None);
                    });
                    if ui.button("Clear cache").clicked() {
                        action = GalleryAction::ClearCache;
                    }
                });

                CollapsingHeader::new("Session state").show(ui, |ui| {
                    if ui.button("Increment").clicked() {
                        let count = session.increment();
                        log::debug!("Session counter at {}", count);
                    }
                    ui.label(format!("Count: {}", session.count));
                });
            });

        action
    }

    fn text_section(ui: &mut egui::Ui, inputs: &mut GalleryInputs) {
        ui.label(RichText::new("Hello, egui! 👋").size(28.0).strong());
        ui.label("This is my first Data Explorer app!");
        ui.horizontal(|ui| {
            ui.label("What's your name?");
            ui.text_edit_singleline(&mut inputs.name);
        });
        if !inputs.name.is_empty() {
            ui.label(format!("Hello, {}!", inputs.name));
        }
        ui.separator();

        ui.label(RichText::new("My App Title").size(28.0).strong());
        ui.label(RichText::new("This is a header").size(22.0).strong());
        ui.label(RichText::new("This is a subheader").size(18.0).strong());
        ui.label("This is regular text");
        ui.horizontal(|ui| {
            ui.label(RichText::new("Bold").strong());
            ui.label("and");
            ui.label(RichText::new("italic").italics());
            ui.label("text");
        });
        widgets::code_block(ui, "println!(\"Hello, World!\");");
    }

    fn data_section(&self, ui: &mut egui::Ui) {
        match &self.people {
            Some(df) => {
                ui.label(RichText::new("Interactive table").strong());
                table::show_dataframe(ui, "gallery_people", df, None, 120.0);
                ui.add_space(8.0);
                ui.label(RichText::new("Static table").strong());
                table::show_static_table(ui, "gallery_people_static", df);
            }
            None => widgets::error(ui, "Demo table unavailable"),
        }
        ui.add_space(8.0);
        widgets::metric(ui, "Temperature", "70 °F", Some("-1.2 °F"));
        ui.add_space(8.0);
        widgets::json_tree(ui, "root", &serde_json::json!({ "name": "Alice", "age": 25 }));
    }

    fn input_section(ui: &mut egui::Ui, inputs: &mut GalleryInputs) {
        egui::Grid::new("gallery_inputs")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Enter your name");
                ui.text_edit_singleline(&mut inputs.name);
                ui.end_row();

                ui.label("Enter your age");
                ui.add(egui::DragValue::new(&mut inputs.age).range(0..=120));
                ui.end_row();

                ui.label("Select score");
                ui.add(egui::Slider::new(&mut inputs.score, 0..=100));
                ui.end_row();

                ui.label("Choose option");
                ComboBox::from_id_salt("gallery_select")
                    .selected_text(inputs.option.as_str())
                    .show_ui(ui, |ui| {
                        for option in SELECT_OPTIONS {
                            ui.selectable_value(&mut inputs.option, option.to_string(), option);
                        }
                    });
                ui.end_row();

                ui.label("Choose multiple");
                ui.horizontal(|ui| {
                    for option in MULTI_OPTIONS {
                        let mut checked = inputs.choices.iter().any(|c| c == option);
                        if ui.checkbox(&mut checked, option).changed() {
                            inputs.toggle_choice(option, &MULTI_OPTIONS);
                        }
                    }
                });
                ui.end_row();

                ui.label("");
                ui.checkbox(&mut inputs.agree, "I agree");
                ui.end_row();

                ui.label("Pick one");
                ui.horizontal(|ui| {
                    for option in RADIO_OPTIONS {
                        ui.radio_value(&mut inputs.pick, option.to_string(), option);
                    }
                });
                ui.end_row();

                ui.label("");
                ui.horizontal(|ui| {
                    if ui.button("Click me").clicked() {
                        inputs.button_clicked = true;
                    }
                    if inputs.button_clicked {
                        ui.label("Button clicked!");
                    }
                });
                ui.end_row();

                ui.label("Upload file");
                ui.horizontal(|ui| {
                    if ui.button("📂 Browse").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("CSV or text", &["csv", "txt"])
                            .pick_file()
                        {
                            inputs.picked_file = Some(path);
                        }
                    }
                    if let Some(name) = inputs.picked_file.as_ref().and_then(|p| p.file_name()) {
                        ui.label(name.to_string_lossy().to_string());
                    }
                });
                ui.end_row();
            });
    }

    fn chart_section(&self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Line chart").strong());
        ChartPlotter::draw_line_chart(ui, "gallery_line", &self.chart_data, CHART_HEIGHT);
        ui.label(RichText::new("Bar chart").strong());
        ChartPlotter::draw_bar_chart(ui, "gallery_bar", &self.chart_data, CHART_HEIGHT);
        ui.label(RichText::new("Area chart").strong());
        ChartPlotter::draw_area_chart(ui, "gallery_area", &self.chart_data, CHART_HEIGHT);
        ui.label(RichText::new("Map").strong());
        ChartPlotter::draw_map(ui, "gallery_map", &self.map_points, CHART_HEIGHT);
        ui.label(RichText::new("Scatter").strong());
        ChartPlotter::draw_scatter(ui, "gallery_scatter", &self.scatter, CHART_HEIGHT);
    }

    fn layout_section(ui: &mut egui::Ui, inputs: &mut GalleryInputs) {
        ui.label(format!(
            "Sidebar selection: {} (see the panel on the left)",
            inputs.sidebar_option
        ));
        ui.add_space(6.0);

        ui.columns(3, |cols| {
            for (i, col) in cols.iter_mut().enumerate() {
                col.label(format!("Column {}", i + 1));
            }
        });
        ui.add_space(6.0);

        CollapsingHeader::new("Click to expand")
            .id_salt("gallery_expander")
            .show(ui, |ui| {
                ui.label("Hidden content here");
            });
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            for (i, tab) in LAYOUT_TABS.iter().enumerate() {
                ui.selectable_value(&mut inputs.layout_tab, i, *tab);
            }
        });
        let tab = inputs.layout_tab.min(LAYOUT_TABS.len() - 1);
        ui.label(format!("Content for tab {}", tab + 1));
        ui.add_space(6.0);

        ui.group(|ui| {
            ui.label("This is inside a container");
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_data_is_built() {
        let gallery = WidgetGallery::new(3);
        let people = gallery.people.as_ref().unwrap();
        assert_eq!(people.shape(), (3, 3));
        assert_eq!(gallery.chart_data.columns, vec!["A", "B", "C"]);
        assert_eq!(gallery.scatter.points.len(), 20);
        assert_eq!(gallery.map_points.len(), 100);
    }
}

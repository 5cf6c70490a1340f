//! Control Panel Widget
//! Left side panel with the data source and cache controls.

use crate::data::CacheStats;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// Left side control panel with file selection and status.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub status: String,
    pub is_error: bool,
    pub is_loading: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            status: "Ready".to_string(),
            is_error: false,
            is_loading: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = false;
    }

    pub fn set_error(&mut self, error: &str) {
        self.status = format!("Error: {}", error);
        self.is_error = true;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, cache: CacheStats) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Data Explorer")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            ui.visuals().strong_text_color()
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!self.is_loading, |ui| {
                            if ui.button("📂 Browse").clicked() {
                                action = ControlPanelAction::BrowseCsv;
                            }
                        });
                    });
                });
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.add_enabled_ui(self.csv_path.is_some() && !self.is_loading, |ui| {
                if ui.button("🔄 Reload").clicked() {
                    action = ControlPanelAction::Reload;
                }
            });
            if ui.button("🗑 Clear cache").clicked() {
                action = ControlPanelAction::ClearCache;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Cache Section =====
        ui.label(RichText::new("💾 Cache").size(14.0).strong());
        ui.add_space(5.0);
        ui.label(
            RichText::new(format!(
                "{} cached file(s), {} hit(s), {} miss(es)",
                cache.entries, cache.hits, cache.misses
            ))
            .size(11.0)
            .color(Color32::GRAY),
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📋 Status").size(14.0).strong());
        ui.add_space(5.0);

        if self.is_loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new(&self.status).size(11.0));
            });
        } else {
            let status_color = if self.is_error {
                Color32::from_rgb(220, 53, 69)
            } else if self.status.starts_with("Loaded") {
                Color32::from_rgb(40, 167, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        }

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    Reload,
    ClearCache,
}

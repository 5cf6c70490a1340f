//! Small display widgets shared by the explorer and the gallery.

use egui::{Color32, RichText};
use serde_json::Value;

const UP_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
const DOWN_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Delta arrow and color: a leading minus means the value went down.
pub fn delta_style(delta: &str) -> (&'static str, Color32) {
    if delta.trim_start().starts_with('-') {
        ("▼", DOWN_COLOR)
    } else {
        ("▲", UP_COLOR)
    }
}

/// Labelled headline number with an optional change indicator.
pub fn metric(ui: &mut egui::Ui, label: &str, value: &str, delta: Option<&str>) {
    ui.vertical(|ui| {
        ui.label(RichText::new(label).size(13.0).color(Color32::GRAY));
        ui.label(RichText::new(value).size(28.0).strong());
        if let Some(delta) = delta {
            let (arrow, color) = delta_style(delta);
            ui.label(
                RichText::new(format!("{} {}", arrow, delta.trim_start_matches('-')))
                    .size(13.0)
                    .color(color),
            );
        }
    });
}

/// Blue callout box.
pub fn info(ui: &mut egui::Ui, text: &str) {
    egui::Frame::none()
        .fill(Color32::from_rgba_unmultiplied(100, 149, 237, 40))
        .rounding(5.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(text).size(14.0));
        });
}

pub fn error(ui: &mut egui::Ui, text: &str) {
    egui::Frame::none()
        .fill(DOWN_COLOR.gamma_multiply(0.2))
        .rounding(5.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(text).size(13.0).color(DOWN_COLOR));
        });
}

/// Monospace block with a background.
pub fn code_block(ui: &mut egui::Ui, code: &str) {
    egui::Frame::none()
        .fill(ui.visuals().extreme_bg_color)
        .rounding(5.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(code).monospace());
        });
}

/// Collapsible JSON tree.
pub fn json_tree(ui: &mut egui::Ui, key: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            egui::CollapsingHeader::new(format!("{} {{{}}}", key, map.len()))
                .id_salt(ui.next_auto_id())
                .default_open(true)
                .show(ui, |ui| {
                    for (k, v) in map {
                        json_tree(ui, k, v);
                    }
                });
        }
        Value::Array(items) => {
            egui::CollapsingHeader::new(format!("{} [{}]", key, items.len()))
                .id_salt(ui.next_auto_id())
                .default_open(true)
                .show(ui, |ui| {
                    for (i, v) in items.iter().enumerate() {
                        json_tree(ui, &i.to_string(), v);
                    }
                });
        }
        scalar => {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("{}:", key)).monospace());
                ui.label(
                    RichText::new(scalar.to_string())
                        .monospace()
                        .color(Color32::from_rgb(46, 204, 113)),
                );
            });
        }
    }
}

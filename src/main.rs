//! Data Explorer - CSV Data Explorer & Widget Gallery
//!
//! Pick a CSV file to see overview metrics, the raw table, descriptive
//! statistics and a scatter plot of two numeric columns.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use config::AppConfig;
use eframe::egui;
use gui::ExplorerApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load();
    let initial_csv = std::env::args_os().nth(1).map(PathBuf::from);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([900.0, 600.0])
            .with_title("📊 Data Explorer"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Data Explorer",
        options,
        Box::new(|cc| Ok(Box::new(ExplorerApp::new(cc, config, initial_csv)))),
    )
}

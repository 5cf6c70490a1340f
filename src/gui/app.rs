//! Data Explorer Main Application
//! Main window with control panel, explorer view and widget gallery.

use crate::charts::StaticChartRenderer;
use crate::config::AppConfig;
use crate::data::{load_csv, CacheKey, DataCache, DataLoader};
use crate::gui::explorer_view::ExplorerAction;
use crate::gui::gallery::GalleryAction;
use crate::gui::session::{SessionState, Tab};
use crate::gui::{ControlPanel, ControlPanelAction, ExplorerView, WidgetGallery};
use egui::{RichText, SidePanel, TopBottomPanel};
use polars::prelude::*;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    /// Parsed frame; the key is `None` when the file changed while parsing.
    Complete(DataFrame, Option<CacheKey>),
    Error(String),
}

/// A load in flight: where results arrive and which file was requested.
struct PendingLoad {
    rx: Receiver<LoadResult>,
    path: PathBuf,
}

/// Main application window.
pub struct ExplorerApp {
    config: AppConfig,
    loader: DataLoader,
    cache: DataCache,
    control_panel: ControlPanel,
    explorer: ExplorerView,
    gallery: WidgetGallery,
    session: SessionState,
    pending: Option<PendingLoad>,
}

impl ExplorerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        initial_csv: Option<PathBuf>,
    ) -> Self {
        let session: SessionState = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let mut app = Self::with_session(config, session);
        if let Some(path) = initial_csv {
            app.request_load(path);
        }
        app
    }

    fn with_session(config: AppConfig, session: SessionState) -> Self {
        Self {
            cache: DataCache::with_capacity(config.cache_capacity),
            config,
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            explorer: ExplorerView::new(),
            gallery: WidgetGallery::default(),
            session,
            pending: None,
        }
    }

    fn handle_browse_csv(&mut self) {
        if self.pending.is_some() {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.request_load(path);
        }
    }

    /// Serve from cache, or parse in a background thread.
    fn request_load(&mut self, path: PathBuf) {
        if self.pending.is_some() {
            return;
        }

        let options = self.config.csv.clone();

        let key = match CacheKey::for_file(&path, &options) {
            Ok(key) => key,
            Err(e) => {
                log::error!("Cannot stat {}: {}", path.display(), e);
                self.control_panel
                    .set_error(&format!("Cannot read {}: {}", path.display(), e));
                return;
            }
        };

        if let Some(df) = self.cache.get(&key) {
            self.apply_loaded(path, df, true);
            return;
        }

        log::info!("Loading {}", path.display());
        self.control_panel.set_status(&format!("Reading {}...", path.display()));
        self.control_panel.is_loading = true;

        let (tx, rx) = channel();
        let worker_path = path.clone();
        thread::spawn(move || {
            let result = match load_csv(&worker_path, &options) {
                // Only cache what matches the metadata the key was built from.
                Ok(df) if key.is_current() => LoadResult::Complete(df, Some(key)),
                Ok(df) => {
                    log::debug!("{} changed while parsing; not caching", worker_path.display());
                    LoadResult::Complete(df, None)
                }
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });

        self.pending = Some(PendingLoad { rx, path });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        match pending.rx.try_recv() {
            Ok(LoadResult::Complete(df, key)) => {
                self.control_panel.is_loading = false;
                if let Some(key) = key {
                    self.cache.insert(key, df.clone());
                }
                self.apply_loaded(pending.path, df, false);
            }
            Ok(LoadResult::Error(error)) => {
                log::error!("Failed to load {}: {}", pending.path.display(), error);
                self.control_panel.is_loading = false;
                self.control_panel.set_error(&error);
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.pending = Some(pending);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                log::error!("Loader thread for {} exited early", pending.path.display());
                self.control_panel.is_loading = false;
                self.control_panel.set_error("Loader stopped unexpectedly");
            }
        }
    }

    fn apply_loaded(&mut self, path: PathBuf, df: DataFrame, from_cache: bool) {
        let (rows, cols) = df.shape();
        self.control_panel.csv_path = Some(path.clone());
        self.loader.set_dataframe(path, df);
        self.explorer.set_data(&self.loader);

        let source = if from_cache { " (cached)" } else { "" };
        log::info!("Loaded {} rows, {} columns{}", rows, cols, source);
        self.control_panel
            .set_status(&format!("Loaded {} rows, {} columns{}", rows, cols, source));
    }

    fn handle_reload(&mut self) {
        if let Some(path) = self.loader.file_path().cloned() {
            self.request_load(path);
        }
    }

    fn handle_clear_cache(&mut self) {
        self.cache.clear();
        self.control_panel.set_status("Cache cleared");
    }

    /// Write the current scatter plot to a PNG and open it.
    fn handle_export_png(&mut self) {
        let Some(Ok(scatter)) = &self.explorer.scatter else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(format!("{}_vs_{}.png", scatter.y_label, scatter.x_label))
            .save_file()
        else {
            return; // User cancelled
        };

        match StaticChartRenderer::render_scatter_png(
            scatter,
            &output_path,
            self.config.export_width,
            self.config.export_height,
        ) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                if let Err(e) = open::that(&output_path) {
                    log::warn!("Could not open {}: {}", output_path.display(), e);
                }
            }
            Err(e) => {
                log::error!("PNG export failed: {:#}", e);
                self.control_panel.set_error(&format!("{:#}", e));
            }
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.pending.is_some() {
            ctx.request_repaint();
        }

        TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(
                    &mut self.session.tab,
                    Tab::Explorer,
                    RichText::new("📊 Data Explorer").size(15.0),
                );
                ui.selectable_value(
                    &mut self.session.tab,
                    Tab::Gallery,
                    RichText::new("🧩 Widget Gallery").size(15.0),
                );
            });
        });

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, self.cache.stats());

                    if self.session.tab == Tab::Gallery {
                        ui.add_space(15.0);
                        ui.separator();
                        ui.add_space(10.0);
                        self.gallery.show_sidebar(ui, &mut self.session.gallery);
                    }

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::Reload => self.handle_reload(),
                        ControlPanelAction::ClearCache => self.handle_clear_cache(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Explorer or Gallery
        egui::CentralPanel::default().show(ctx, |ui| match self.session.tab {
            Tab::Explorer => {
                let action = self
                    .explorer
                    .show(ui, &self.loader, self.config.preview_rows);
                if action == ExplorerAction::ExportPng {
                    self.handle_export_png();
                }
            }
            Tab::Gallery => {
                let action = self
                    .gallery
                    .show(ui, &mut self.session, self.cache.stats());
                if action == GalleryAction::ClearCache {
                    self.handle_clear_cache();
                }
            }
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn write_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "data_explorer_app_{}_{}.csv",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn app() -> ExplorerApp {
        ExplorerApp::with_session(AppConfig::default(), SessionState::default())
    }

    /// Poll the background loader until it reports back.
    fn finish_load(app: &mut ExplorerApp) {
        let deadline = Instant::now() + Duration::from_secs(30);
        while app.pending.is_some() {
            assert!(Instant::now() < deadline, "load did not finish");
            thread::sleep(Duration::from_millis(5));
            app.check_load_results();
        }
    }

    fn load(app: &mut ExplorerApp, path: &PathBuf) {
        app.request_load(path.clone());
        finish_load(app);
    }

    #[test]
    fn successful_load_sets_frame_and_label() {
        let path = write_csv("good", "x,y\n1,2\n3,4\n");
        let mut app = app();
        load(&mut app, &path);

        assert_eq!(app.loader.dataframe().map(|df| df.height()), Some(2));
        assert_eq!(app.control_panel.csv_path.as_ref(), Some(&path));
        assert_eq!(app.loader.file_path(), Some(&path));
        assert!(!app.control_panel.is_error);
        assert!(!app.control_panel.is_loading);
        assert_eq!(app.cache.stats().entries, 1);
    }

    #[test]
    fn missing_file_keeps_previous_frame_and_label() {
        let good = write_csv("keep_good", "x,y\n1,2\n3,4\n");
        let missing = std::env::temp_dir().join("data_explorer_app_missing_zzz.csv");
        let mut app = app();
        load(&mut app, &good);

        app.request_load(missing);
        assert!(app.pending.is_none());
        assert!(app.control_panel.is_error);
        assert_eq!(app.loader.dataframe().map(|df| df.height()), Some(2));
        assert_eq!(app.control_panel.csv_path.as_ref(), app.loader.file_path());
    }

    #[test]
    fn empty_file_keeps_previous_frame_and_label() {
        let good = write_csv("empty_good", "x,y\n1,2\n");
        let empty = write_csv("empty_bad", "");
        let mut app = app();
        load(&mut app, &good);

        load(&mut app, &empty);
        assert!(app.control_panel.is_error);
        assert!(app.control_panel.status.starts_with("Error:"));
        assert_eq!(app.loader.dataframe().map(|df| df.height()), Some(1));
        assert_eq!(app.control_panel.csv_path.as_ref(), Some(&good));
        assert_eq!(app.loader.file_path(), Some(&good));
    }

    #[test]
    fn unchanged_file_is_served_from_cache() {
        let path = write_csv("cached", "x,y\n1,2\n");
        let mut app = app();
        load(&mut app, &path);

        app.request_load(path.clone());
        assert!(app.pending.is_none());
        assert_eq!(app.cache.stats().hits, 1);
        assert!(app.control_panel.status.ends_with("(cached)"));
        assert_eq!(app.loader.dataframe().map(|df| df.height()), Some(1));
    }

    #[test]
    fn second_request_while_loading_is_ignored() {
        let first = write_csv("inflight_first", "x,y\n1,2\n");
        let second = write_csv("inflight_second", "a\n1\n2\n3\n");
        let mut app = app();

        app.request_load(first.clone());
        assert!(app.pending.is_some());
        app.request_load(second);
        assert_eq!(app.pending.as_ref().map(|p| p.path.clone()), Some(first.clone()));

        finish_load(&mut app);
        assert_eq!(app.loader.file_path(), Some(&first));
        assert_eq!(app.cache.stats().misses, 1);
    }

    #[test]
    fn reload_uses_the_loaded_file_after_a_failure() {
        let good = write_csv("reload_good", "x,y\n1,2\n");
        let mut app = app();
        load(&mut app, &good);
        app.request_load(std::env::temp_dir().join("data_explorer_app_reload_missing.csv"));

        app.handle_reload();
        finish_load(&mut app);
        assert_eq!(app.loader.file_path(), Some(&good));
        assert_eq!(app.control_panel.csv_path.as_ref(), Some(&good));
        assert!(!app.control_panel.is_error);
    }
}

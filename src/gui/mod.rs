//! GUI module - User interface components

mod app;
mod control_panel;
mod explorer_view;
mod gallery;
mod session;
mod table;
mod widgets;

pub use app::ExplorerApp;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use explorer_view::ExplorerView;
pub use gallery::WidgetGallery;

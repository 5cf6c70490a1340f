//! Session state kept across frames and, through eframe storage, across restarts.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    Explorer,
    Gallery,
}

/// Values bound to the gallery's input widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryInputs {
    pub name: String,
    pub age: u32,
    pub score: i32,
    pub option: String,
    pub choices: Vec<String>,
    pub agree: bool,
    pub pick: String,
    pub button_clicked: bool,
    pub picked_file: Option<PathBuf>,
    pub sidebar_option: String,
    pub layout_tab: usize,
}

impl Default for GalleryInputs {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: 0,
            score: 50,
            option: "A".to_string(),
            choices: Vec::new(),
            agree: false,
            pick: "Option A".to_string(),
            button_clicked: false,
            picked_file: None,
            sidebar_option: "A".to_string(),
            layout_tab: 0,
        }
    }
}

impl GalleryInputs {
    /// Add or remove `choice` from the multi-select, keeping `all`'s order.
    pub fn toggle_choice(&mut self, choice: &str, all: &[&str]) {
        if let Some(pos) = self.choices.iter().position(|c| c == choice) {
            self.choices.remove(pos);
        } else {
            self.choices.push(choice.to_string());
            self.choices
                .sort_by_key(|c| all.iter().position(|a| *a == c.as_str()).unwrap_or(usize::MAX));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub count: i64,
    pub tab: Tab,
    pub gallery: GalleryInputs,
}

impl SessionState {
    pub fn increment(&mut self) -> i64 {
        self.count += 1;
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_starts_at_zero_and_increments() {
        let mut session = SessionState::default();
        assert_eq!(session.count, 0);
        assert_eq!(session.increment(), 1);
        assert_eq!(session.increment(), 2);
    }

    #[test]
    fn restores_from_partial_json() {
        let session: SessionState = serde_json::from_str(r#"{ "count": 5 }"#).unwrap();
        assert_eq!(session.count, 5);
        assert_eq!(session.tab, Tab::Explorer);
        assert_eq!(session.gallery.score, 50);
    }

    #[test]
    fn toggle_choice_keeps_option_order() {
        let all = ["Option 1", "Option 2", "Option 3"];
        let mut inputs = GalleryInputs::default();
        inputs.toggle_choice("Option 3", &all);
        inputs.toggle_choice("Option 1", &all);
        assert_eq!(inputs.choices, vec!["Option 1", "Option 3"]);
        inputs.toggle_choice("Option 3", &all);
        assert_eq!(inputs.choices, vec!["Option 1"]);
    }
}

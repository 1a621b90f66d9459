//! Serializable application state owned by the editor host.

use super::fonts::{font_at, FONTS};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which surface is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Edit,
    Preview,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Edit => ViewMode::Preview,
            ViewMode::Preview => ViewMode::Edit,
        }
    }

    /// Label shown on the mode toggle.
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Edit => "Edit",
            ViewMode::Preview => "Preview",
        }
    }
}

/// Everything the UI handlers need to know, in one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub mode: ViewMode,
    /// Buffer differs from what was last opened or saved.
    pub dirty: bool,
    pub current_file: Option<PathBuf>,
    pub font_index: usize,
}

impl AppState {
    pub fn toggle_mode(&mut self) -> ViewMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub fn is_preview(&self) -> bool {
        self.mode == ViewMode::Preview
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Records a successful open or save of `path`.
    pub fn mark_saved(&mut self, path: &Path) {
        self.current_file = Some(path.to_path_buf());
        self.dirty = false;
    }

    pub fn font(&self) -> &'static str {
        font_at(self.font_index)
    }

    /// Advances to the next font and returns it.
    pub fn cycle_font(&mut self) -> &'static str {
        self.font_index = (self.font_index + 1) % FONTS.len();
        self.font()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

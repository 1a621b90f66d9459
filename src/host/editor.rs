//! The editor host: owns the text buffer and state, and calls the renderer
//! whenever the preview surface needs fresh markup.

use super::document::{open_document, save_document};
use super::prompts::insert_prompt;
use super::shortcuts::Command;
use super::state::{AppState, ViewMode};
use super::stats::{word_count, word_count_label};
use crate::converter::MarkdownToHtml;
use crate::render::Renderer;
use crate::Result;
use std::path::{Path, PathBuf};

/// File pickers supplied by the UI layer. `None` means the user cancelled.
pub trait FileDialog {
    fn pick_open(&mut self) -> Option<PathBuf>;
    fn pick_save(&mut self, default: Option<&Path>) -> Option<PathBuf>;
}

pub struct EditorHost<R: Renderer = MarkdownToHtml> {
    renderer: R,
    buffer: String,
    state: AppState,
    preview: Option<String>,
}

impl Default for EditorHost<MarkdownToHtml> {
    fn default() -> Self {
        Self::new(MarkdownToHtml::with_defaults())
    }
}

impl<R: Renderer> EditorHost<R> {
    pub fn new(renderer: R) -> Self {
        Self::with_state(renderer, AppState::default())
    }

    /// Resumes from a previously saved state. A saved preview mode is honoured
    /// by rendering once up front.
    pub fn with_state(renderer: R, state: AppState) -> Self {
        let mut host = Self {
            renderer,
            buffer: String::new(),
            state,
            preview: None,
        };
        if host.state.is_preview() {
            host.refresh_preview();
        }
        host
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Markup currently mounted in the preview surface.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn word_count_label(&self) -> String {
        word_count_label(word_count(&self.buffer))
    }

    /// Replaces the buffer after an edit. While previewing, the preview is
    /// re-rendered from the new text.
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.state.mark_dirty();
        if self.state.is_preview() {
            self.refresh_preview();
        }
    }

    /// Switches between edit and preview. Entering preview renders exactly once
    /// and returns the markup.
    pub fn toggle_mode(&mut self) -> Option<&str> {
        match self.state.toggle_mode() {
            ViewMode::Preview => {
                self.refresh_preview();
                self.preview.as_deref()
            }
            ViewMode::Edit => {
                self.preview = None;
                None
            }
        }
    }

    fn ensure_edit_mode(&mut self) {
        if self.state.is_preview() {
            self.toggle_mode();
        }
    }

    fn refresh_preview(&mut self) {
        let html = self.renderer.render(&self.buffer);
        tracing::debug!(bytes = html.len(), "preview refreshed");
        self.preview = Some(html);
    }

    /// Loads `path` into the buffer and returns to edit mode.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        self.buffer = open_document(path)?;
        self.state.mark_saved(path);
        self.ensure_edit_mode();
        Ok(())
    }

    /// Writes the buffer to `path` and returns the path actually written.
    pub fn save_as(&mut self, path: &Path) -> Result<PathBuf> {
        let written = save_document(path, &self.buffer)?;
        self.state.mark_saved(&written);
        Ok(written)
    }

    /// Inserts a prompt at `cursor` and returns to edit mode. Returns the
    /// cursor position after the inserted text.
    pub fn insert_prompt(&mut self, cursor: usize, prompt: &str) -> usize {
        let (text, new_cursor) = insert_prompt(&self.buffer, cursor, prompt);
        self.buffer = text;
        self.state.mark_dirty();
        self.ensure_edit_mode();
        new_cursor
    }

    pub fn cycle_font(&mut self) -> &'static str {
        self.state.cycle_font()
    }

    /// Runs a keyboard command. File commands ask `dialog` for a path and do
    /// nothing when it is cancelled.
    pub fn dispatch(&mut self, command: Command, dialog: &mut dyn FileDialog) -> Result<()> {
        tracing::debug!(?command, "dispatching command");
        match command {
            Command::ToggleMode => {
                self.toggle_mode();
            }
            Command::OpenFile => {
                if let Some(path) = dialog.pick_open() {
                    self.open(&path)?;
                }
            }
            Command::SaveFile => {
                let default = self.state.current_file.clone();
                if let Some(path) = dialog.pick_save(default.as_deref()) {
                    self.save_as(&path)?;
                }
            }
        }
        Ok(())
    }
}

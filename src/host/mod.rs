//! Host-side model around the renderer.
//!
//! Everything here is plain data and synchronous logic; the UI layer owns
//! widgets and event loops and calls into these types.

mod document;
mod editor;
mod fonts;
mod prompts;
mod shortcuts;
mod state;
mod stats;
mod timer;

pub use document::{
    is_markdown_path, open_document, save_document, OPEN_EXTENSIONS, SAVE_EXTENSION,
};
pub use editor::{EditorHost, FileDialog};
pub use fonts::{css_font_variable, font_at, FONTS};
pub use prompts::{insert_prompt, PromptLibrary};
pub use shortcuts::{command_for, Command};
pub use state::{AppState, ViewMode};
pub use stats::{word_count, word_count_label};
pub use timer::{Countdown, TimerEvent, IDLE_TIMER_LABEL};

//! Reading and writing markdown documents.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Extensions offered by the open dialog.
pub const OPEN_EXTENSIONS: [&str; 2] = ["md", "markdown"];
/// Extension offered by the save dialog and appended to bare names.
pub const SAVE_EXTENSION: &str = "md";

pub fn is_markdown_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            OPEN_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

/// Reads a markdown document as UTF-8 text.
pub fn open_document(path: &Path) -> Result<String> {
    if !is_markdown_path(path) {
        return Err(Error::UnsupportedFile(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    tracing::info!(path = %path.display(), bytes = text.len(), "opened document");
    Ok(text)
}

/// Writes `text` to `path`, appending `.md` when the name has no extension.
///
/// Returns the path actually written.
pub fn save_document(path: &Path, text: &str) -> Result<PathBuf> {
    let target = if path.extension().is_none() {
        path.with_extension(SAVE_EXTENSION)
    } else {
        path.to_path_buf()
    };
    std::fs::write(&target, text)?;
    tracing::info!(path = %target.display(), bytes = text.len(), "saved document");
    Ok(target)
}

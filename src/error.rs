//! Error types for quillmark.
//!
//! Rendering itself is infallible; these cover the host-side operations
//! around it (documents, prompt library, timer input, external links).

use std::path::PathBuf;
use thiserror::Error;

/// Result type for quillmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the writing-app host.
#[derive(Error, Debug)]
pub enum Error {
    /// Error occurred during file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Prompt library or saved state could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File does not carry a markdown extension.
    #[error("Unsupported file (expected .md or .markdown): {}", .0.display())]
    UnsupportedFile(PathBuf),

    /// Countdown input out of range.
    #[error("Invalid timer: {0}")]
    InvalidTimer(String),

    /// The prompt library has nothing to offer.
    #[error("No prompts available")]
    NoPrompts,

    /// Requested prompt category does not exist.
    #[error("Unknown prompt category: {0}")]
    UnknownCategory(String),

    /// External link could not be opened.
    #[error("Failed to open link: {0}")]
    Open(String),
}

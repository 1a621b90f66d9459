//! # quillmark
//!
//! Markdown preview renderer for a distraction-free writing app, plus the
//! host-side model (editor state, documents, timer, prompts) that drives it.
//!
//! ## Example
//!
//! ```
//! use quillmark::{MarkdownToHtml, RenderOptions};
//!
//! let converter = MarkdownToHtml::new(RenderOptions::default());
//! let html = converter.convert("# Title\n\n**bold** and `code`");
//! assert!(html.contains("<h1>Title</h1>"));
//! assert!(html.contains("<strong>bold</strong>"));
//! ```

pub mod converter;
pub mod error;
pub mod host;
pub mod render;

pub use converter::MarkdownToHtml;
pub use error::{Error, Result};
pub use host::{AppState, EditorHost, ViewMode};
pub use render::{extract_links, LinkActivationHandler, Renderer};

/// Options for Markdown to HTML rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Whether anchors open in a new context with opener access disabled.
    pub open_links_externally: bool,
    /// Whether literal `<br>` and `<hr>` in the source are kept as tags.
    pub restore_safe_tags: bool,
    /// Whether `javascript:`-style link targets are replaced with `#`.
    pub block_script_urls: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            open_links_externally: true,
            restore_safe_tags: true,
            block_script_urls: true,
        }
    }
}

/// Renders markdown to an HTML fragment with default options.
///
/// Total and deterministic: any input yields a string, the same input always
/// yields the same string.
pub fn render(source: &str) -> String {
    MarkdownToHtml::with_defaults().convert(source)
}

// Python bindings (only when 'python' feature is enabled)
#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use pyo3::prelude::*;

    /// Renders markdown text to an HTML fragment.
    #[pyfunction]
    fn render_markdown(text: String) -> String {
        render(&text)
    }

    /// Returns `(href, text)` pairs for every anchor in rendered HTML.
    #[pyfunction]
    fn rendered_links(html: String) -> Vec<(String, String)> {
        extract_links(&html)
            .into_iter()
            .map(|link| (link.href, link.text))
            .collect()
    }

    /// A Python module implemented in Rust.
    #[pymodule]
    pub fn quillmark(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(render_markdown, m)?)?;
        m.add_function(wrap_pyfunction!(rendered_links, m)?)?;
        Ok(())
    }
}

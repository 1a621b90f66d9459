//! Converter stages for Markdown to HTML transformation.
//!
//! The renderer is an ordered pipeline of text rewrites. Order is load-bearing:
//! escaping runs first so the only real tags are the ones emitted here, code is
//! shielded before any markdown rule can see it, double emphasis markers are
//! consumed before single ones, images before links, and paragraph wrapping
//! only touches lines no earlier stage claimed.

mod block;
mod inline;
mod list;
mod paragraph;
mod protect;
mod rules;
mod table;

use crate::render::escape::{escape_html, restore_safe_tags};
use crate::render::Renderer;
use crate::RenderOptions;
use protect::Shielded;
use rules::apply_all;

/// Main converter struct that runs the Markdown to HTML pipeline.
///
/// Holds no per-document state: every call to [`MarkdownToHtml::convert`] is
/// independent, so one instance can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct MarkdownToHtml {
    options: RenderOptions,
}

impl MarkdownToHtml {
    /// Creates a new converter with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Creates a new converter with default options.
    pub fn with_defaults() -> Self {
        Self::new(RenderOptions::default())
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Converts markdown source into an HTML fragment.
    ///
    /// Never fails; malformed markdown degrades to literal text.
    pub fn convert(&self, source: &str) -> String {
        let mut shielded = Shielded::default();

        let text = escape_html(source);
        let text = protect::shield_code(&text, &mut shielded);
        let text = protect::shield_destinations(&text, &mut shielded);
        tracing::trace!(fragments = shielded.len(), "shielded code and destinations");

        let text = apply_all(block::rules(), text);
        let text = apply_all(inline::emphasis_rules(), text);

        let text = apply_all(list::item_rules(), text);
        let text = list::wrap_list_runs(&text);
        let text = apply_all(list::ordered_rules(), text);

        let text = inline::render_images(&text, &mut shielded, &self.options);
        let text = inline::render_links(&text, &mut shielded, &self.options);

        let text = table::render_tables(&text);
        let text = paragraph::wrap_paragraphs(&text);
        let text = apply_all(paragraph::cleanup_rules(), text);

        let text = if self.options.restore_safe_tags {
            restore_safe_tags(&text)
        } else {
            text
        };
        let html = shielded.restore(&text);

        tracing::debug!(
            input_len = source.len(),
            output_len = html.len(),
            "rendered markdown"
        );
        html
    }
}

impl Renderer for MarkdownToHtml {
    fn render(&self, source: &str) -> String {
        self.convert(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(source: &str) -> String {
        MarkdownToHtml::with_defaults().convert(source)
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_heading_and_paragraph() {
        assert_eq!(render("# A\nbody"), "<h1>A</h1>\n<p>body</p>");
    }

    #[test]
    fn test_code_block_is_not_reinterpreted() {
        assert_eq!(
            render("```md\n# x\n* y\n**z**\n```"),
            "<pre class=\"language-md\"><code># x\n* y\n**z**</code></pre>"
        );
    }

    #[test]
    fn test_inline_code_in_paragraph() {
        assert_eq!(
            render("call `a_b(*c*)` now"),
            "<p>call <code>a_b(*c*)</code> now</p>"
        );
    }

    #[test]
    fn test_escaped_br_inside_code_stays_escaped() {
        assert_eq!(render("`<br>`"), "<p><code>&lt;br&gt;</code></p>");
    }

    #[test]
    fn test_safe_tags_can_stay_escaped() {
        let converter = MarkdownToHtml::new(RenderOptions {
            restore_safe_tags: false,
            ..Default::default()
        });
        assert_eq!(converter.convert("a<br>b"), "<p>a&lt;br&gt;b</p>");
    }

    #[test]
    fn test_blockquote_lines_merge() {
        assert_eq!(
            render("> one\n> two"),
            "<blockquote>one<br>two</blockquote>"
        );
    }

    #[test]
    fn test_ordered_item_is_paragraph() {
        assert_eq!(render("1. *first*"), "<p>1. <em>first</em></p>");
    }

    #[test]
    fn test_link_inside_table_cell() {
        let out = render("|a|b|\n|-|-|\n|[x](http://e/a|b)|2|");
        assert!(out.contains("<td><a href=\"http://e/a|b\""), "{out}");
    }
}

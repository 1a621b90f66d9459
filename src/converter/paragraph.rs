//! Paragraph wrapping and final seam cleanup.

use super::rules::{Replacement, TransformationRule};
use crate::render::escape::BLOCK_SENTINEL;
use std::sync::OnceLock;

/// Tags that already make a line block-level.
const BLOCK_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "ul", "ol", "li", "blockquote", "pre", "hr",
    "table", "thead", "tbody", "tr", "th", "td",
];

/// Returns true when `line` opens (or closes) one of the reserved block tags.
fn starts_with_block_tag(line: &str) -> bool {
    if line.starts_with(BLOCK_SENTINEL) {
        return true;
    }
    let Some(rest) = line.strip_prefix('<') else {
        return false;
    };
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    let name_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let name = &rest[..name_len];
    BLOCK_TAGS
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(name))
}

/// Wraps every non-blank line that is not already block-level in `<p>`.
///
/// Blank lines are kept as-is and never become `<p></p>`.
pub(crate) fn wrap_paragraphs(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                String::new()
            } else if starts_with_block_tag(trimmed) {
                line.to_string()
            } else {
                format!("<p>{trimmed}</p>")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Seam cleanup applied after paragraph wrapping.
pub(crate) fn cleanup_rules() -> &'static [TransformationRule] {
    static RULES: OnceLock<Vec<TransformationRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            TransformationRule::new(
                "merge_unordered_lists",
                r"</ul>\s?<ul>",
                Replacement::Template(""),
            ),
            TransformationRule::new(
                "merge_ordered_lists",
                r"</ol>\s?<ol>",
                Replacement::Template(""),
            ),
            TransformationRule::new(
                "split_paragraphs",
                r"</p><p>",
                Replacement::Template("</p>\n<p>"),
            ),
            TransformationRule::new(
                "merge_blockquotes",
                r"</blockquote>\n<blockquote>",
                Replacement::Template("<br>"),
            ),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::rules::apply_all;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_lines_are_wrapped() {
        assert_eq!(wrap_paragraphs("a\n  b"), "<p>a</p>\n<p>b</p>");
    }

    #[test]
    fn test_blank_lines_never_become_empty_paragraphs() {
        assert_eq!(wrap_paragraphs("a\n\n   \nb"), "<p>a</p>\n\n\n<p>b</p>");
    }

    #[test]
    fn test_block_lines_are_left_alone() {
        let text = "<h1>x</h1>\n<ul>\n<li>a</li>\n</ul>\n<hr/>\n<tr><td>1</td></tr>\n\u{E002}0\u{E001}";
        assert_eq!(wrap_paragraphs(text), text);
    }

    #[test]
    fn test_inline_tags_at_line_start_are_wrapped() {
        assert_eq!(
            wrap_paragraphs("<strong>a</strong> b\n<a href=\"x\">y</a>"),
            "<p><strong>a</strong> b</p>\n<p><a href=\"x\">y</a></p>"
        );
    }

    #[test]
    fn test_header_prefix_is_not_confused_with_hr() {
        assert!(starts_with_block_tag("<hr/>"));
        assert!(starts_with_block_tag("</tbody>"));
        assert!(!starts_with_block_tag("<html>"));
        assert!(!starts_with_block_tag("<pretend>"));
    }

    #[test]
    fn test_cleanup_merges_seams() {
        let out = apply_all(
            cleanup_rules(),
            "<ul>\n<li>a</li>\n</ul>\n<ul>\n<li>b</li>\n</ul>\n<p>x</p><p>y</p>\n\
             <blockquote>q1</blockquote>\n<blockquote>q2</blockquote>"
                .to_string(),
        );
        assert_eq!(
            out,
            "<ul>\n<li>a</li>\n\n<li>b</li>\n</ul>\n<p>x</p>\n<p>y</p>\n<blockquote>q1<br>q2</blockquote>"
        );
    }
}

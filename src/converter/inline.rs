//! Inline formatting: emphasis family, images and links.

use super::protect::Shielded;
use super::rules::{inline_tags_balanced, Replacement, TransformationRule};
use crate::render::escape::{escape_html_attr, sanitize_image_url, sanitize_link_url, strip_tags};
use crate::RenderOptions;
use regex::{Captures, Regex};
use std::sync::OnceLock;

const fn wrap(tag: &'static str) -> Replacement {
    Replacement::Wrap { tag, lead: false }
}

const fn wrap_after_boundary(tag: &'static str) -> Replacement {
    Replacement::Wrap { tag, lead: true }
}

fn strong_em(caps: &Captures<'_>) -> String {
    format!("<strong><em>{}</em></strong>", &caps[1])
}

/// Emphasis rules. Double markers precede single ones so `**x**` and `~~x~~`
/// are never split by the italic or subscript rules.
pub(crate) fn emphasis_rules() -> &'static [TransformationRule] {
    static RULES: OnceLock<Vec<TransformationRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            TransformationRule::new(
                "strong_em",
                r"\*\*\*([^\s*<>](?:[^*\n<>]*[^\s*<>])?)\*\*\*",
                Replacement::With(strong_em),
            ),
            TransformationRule::new(
                "strong_star",
                r"\*\*(\S(?:[^\n]*?\S)??)\*\*",
                wrap("strong"),
            ),
            TransformationRule::new(
                "strong_underscore",
                r"(?m)(^|\W)__(\S(?:[^\n]*?\S)??)__\b",
                wrap_after_boundary("strong"),
            ),
            TransformationRule::new(
                "strikethrough",
                r"~~(\S(?:[^\n]*?\S)??)~~",
                wrap("del"),
            ),
            TransformationRule::new(
                "em_star",
                r"\*([^\s*](?:[^*\n]*[^\s*])?)\*",
                wrap("em"),
            ),
            TransformationRule::new(
                "em_underscore",
                r"(?m)(^|\W)_([^\s_](?:[^_\n]*[^\s_])?)_\b",
                wrap_after_boundary("em"),
            ),
            TransformationRule::new("superscript", r"\^([^\s^]+)\^", wrap("sup")),
            TransformationRule::new("subscript", r"~([^\s~]+)~", wrap("sub")),
        ]
    })
}

fn re_image() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"!\[([^\[\]\n]*)\]\(([\x{E000}]\d+\x{E001})\)").expect("image pattern")
    })
}

fn re_link() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[([^\]\n]+)\]\(([\x{E000}]\d+\x{E001})\)").expect("link pattern")
    })
}

/// Turns `![alt](url)` into `<img>`. Must run before [`render_links`], whose
/// pattern would otherwise claim the bracketed part.
///
/// The alt text is parked as well, so table splitting and tag restoring never
/// reach inside the attribute.
pub(crate) fn render_images(text: &str, shielded: &mut Shielded, options: &RenderOptions) -> String {
    re_image()
        .replace_all(text, |caps: &Captures<'_>| {
            let token = &caps[2];
            let alt = strip_tags(&shielded.restore(&caps[1]));
            let alt = shielded.push_inline(escape_html_attr(alt.trim()));
            shielded.rewrite(token, |url| {
                let url = if options.block_script_urls {
                    sanitize_image_url(url)
                } else {
                    url.trim()
                };
                escape_html_attr(url)
            });
            format!("<img src=\"{token}\" alt=\"{alt}\">")
        })
        .into_owned()
}

/// Turns `[text](url)` into an anchor.
pub(crate) fn render_links(text: &str, shielded: &mut Shielded, options: &RenderOptions) -> String {
    re_link()
        .replace_all(text, |caps: &Captures<'_>| {
            let label = &caps[1];
            let token = &caps[2];
            if !inline_tags_balanced(label) {
                return caps[0].to_string();
            }
            shielded.rewrite(token, |url| {
                let url = if options.block_script_urls {
                    sanitize_link_url(url)
                } else {
                    url.trim()
                };
                escape_html_attr(url)
            });
            if options.open_links_externally {
                format!(
                    "<a href=\"{token}\" target=\"_blank\" rel=\"noopener noreferrer\">{label}</a>"
                )
            } else {
                format!("<a href=\"{token}\">{label}</a>")
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::protect::shield_destinations;
    use crate::converter::rules::apply_all;
    use pretty_assertions::assert_eq;

    fn emphasis(text: &str) -> String {
        apply_all(emphasis_rules(), text.to_string())
    }

    fn links(text: &str, options: &RenderOptions) -> String {
        let mut shielded = Shielded::default();
        let parked = shield_destinations(text, &mut shielded);
        let with_images = render_images(&parked, &mut shielded, options);
        let with_links = render_links(&with_images, &mut shielded, options);
        shielded.restore(&with_links)
    }

    #[test]
    fn test_bold_before_italic() {
        assert_eq!(emphasis("**x**"), "<strong>x</strong>");
        assert_eq!(
            emphasis("**bold and *nested* text**"),
            "<strong>bold and <em>nested</em> text</strong>"
        );
    }

    #[test]
    fn test_two_double_marker_spans_on_one_line() {
        assert_eq!(
            emphasis("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
        assert_eq!(
            emphasis("__a__ and __b__"),
            "<strong>a</strong> and <strong>b</strong>"
        );
        assert_eq!(emphasis("~~a~~ and ~~b~~"), "<del>a</del> and <del>b</del>");
        assert_eq!(
            emphasis("**k**: v, **k2**: v2"),
            "<strong>k</strong>: v, <strong>k2</strong>: v2"
        );
    }

    #[test]
    fn test_bold_italic() {
        assert_eq!(emphasis("***both***"), "<strong><em>both</em></strong>");
    }

    #[test]
    fn test_underscore_forms() {
        assert_eq!(emphasis("__b__ and _i_"), "<strong>b</strong> and <em>i</em>");
        assert_eq!(emphasis("my_var_name"), "my_var_name");
    }

    #[test]
    fn test_strikethrough_before_subscript() {
        assert_eq!(emphasis("~~gone~~"), "<del>gone</del>");
        assert_eq!(emphasis("H~2~O"), "H<sub>2</sub>O");
        assert_eq!(emphasis("~~a~~ and x~i~"), "<del>a</del> and x<sub>i</sub>");
    }

    #[test]
    fn test_superscript() {
        assert_eq!(emphasis("2^10^"), "2<sup>10</sup>");
    }

    #[test]
    fn test_unmatched_markers_stay_literal() {
        assert_eq!(emphasis("**open"), "**open");
        assert_eq!(emphasis("a * b * c"), "a * b * c");
        assert_eq!(emphasis("~/a and ~/b"), "~/a and ~/b");
    }

    #[test]
    fn test_overlap_never_unbalances() {
        let out = emphasis("**a*b**c*");
        assert!(crate::converter::rules::inline_tags_balanced(&out), "{out}");
    }

    #[test]
    fn test_link_is_external() {
        assert_eq!(
            links("[text](http://example.com)", &RenderOptions::default()),
            "<a href=\"http://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">text</a>"
        );
    }

    #[test]
    fn test_link_without_external_attributes() {
        let options = RenderOptions {
            open_links_externally: false,
            ..Default::default()
        };
        assert_eq!(links("[a](b)", &options), "<a href=\"b\">a</a>");
    }

    #[test]
    fn test_image_before_link() {
        assert_eq!(
            links("![a \"cat\"](cat.png)", &RenderOptions::default()),
            "<img src=\"cat.png\" alt=\"a &quot;cat&quot;\">"
        );
    }

    #[test]
    fn test_linked_image() {
        let out = links("[![i](x.png)](http://y)", &RenderOptions::default());
        assert!(out.starts_with("<a href=\"http://y\""));
        assert!(out.contains("<img src=\"x.png\" alt=\"i\"></a>"));
    }

    #[test]
    fn test_alt_text_is_plain() {
        let out = links("![a|*b*](p.png)", &RenderOptions::default());
        assert_eq!(out, "<img src=\"p.png\" alt=\"a|*b*\">");
    }

    #[test]
    fn test_link_label_must_nest() {
        let out = links("[a</em>](u)", &RenderOptions::default());
        assert_eq!(out, "[a</em>](u)");
    }

    #[test]
    fn test_script_urls_are_neutralized() {
        let out = links("[x](javascript:alert(1))", &RenderOptions::default());
        assert!(out.starts_with("<a href=\"#\""), "{out}");
        assert!(out.ends_with("</a>"), "{out}");

        let out = links("![x](javascript:alert(1))", &RenderOptions::default());
        assert_eq!(out, "<img src=\"#\" alt=\"x\">");
    }

    #[test]
    fn test_quote_cannot_break_out_of_href() {
        let out = links("[x](a\"onclick=\"y)", &RenderOptions::default());
        assert!(out.contains("href=\"a&quot;onclick=&quot;y\""), "{out}");
    }
}

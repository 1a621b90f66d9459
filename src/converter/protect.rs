//! Shields code and link destinations from the markdown stages.
//!
//! Fenced blocks and code spans are rendered to their final HTML immediately
//! and replaced by placeholders; `](url)` destinations are parked the same way.
//! Placeholders are put back after every other stage has run.

use crate::render::escape::{BLOCK_SENTINEL, INLINE_SENTINEL, SENTINEL_END};
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn re_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?ms)^```[ \t]*([A-Za-z0-9_+#.\-]*)[ \t]*$\n(.*?)^```[ \t]*$")
            .expect("fence pattern")
    })
}

fn re_code_span() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`\n]+)`").expect("code span pattern"))
}

fn re_destination() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // One level of balanced parentheses, e.g. `wiki/Rust_(language)`.
        Regex::new(
            r"\]\(((?:[^()\n\x{E000}-\x{E002}]|\([^()\n\x{E000}-\x{E002}]*\))*)\)",
        )
        .expect("destination pattern")
    })
}

fn re_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[\x{E000}\x{E002}](\d+)\x{E001}").expect("placeholder pattern")
    })
}

/// Fragments removed from the working text, addressed by placeholder tokens.
#[derive(Debug, Default)]
pub(crate) struct Shielded {
    fragments: Vec<String>,
}

impl Shielded {
    fn push(&mut self, sentinel: char, fragment: String) -> String {
        let token = format!("{sentinel}{}{SENTINEL_END}", self.fragments.len());
        self.fragments.push(fragment);
        token
    }

    /// Parks a fragment that sits inside a line.
    pub fn push_inline(&mut self, fragment: String) -> String {
        self.push(INLINE_SENTINEL, fragment)
    }

    /// Parks a fragment that occupies a whole line as a block element.
    pub fn push_block(&mut self, fragment: String) -> String {
        self.push(BLOCK_SENTINEL, fragment)
    }

    /// Replaces the fragment behind `token` with `rewrite(old)`.
    pub fn rewrite(&mut self, token: &str, rewrite: impl FnOnce(&str) -> String) -> bool {
        let Some(slot) = self.index_of(token).and_then(|i| self.fragments.get_mut(i)) else {
            return false;
        };
        *slot = rewrite(slot.as_str());
        true
    }

    fn index_of(&self, token: &str) -> Option<usize> {
        let caps = re_placeholder().captures(token)?;
        if caps.get(0)?.as_str().len() != token.len() {
            return None;
        }
        caps[1].parse().ok()
    }

    /// Substitutes every placeholder in `text` with its fragment.
    pub fn restore(&self, text: &str) -> String {
        if self.fragments.is_empty() {
            return text.to_string();
        }
        re_placeholder()
            .replace_all(text, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| self.fragments.get(i))
                    .cloned()
                    .unwrap_or_default()
            })
            .into_owned()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }
}

/// Renders fenced code blocks, then inline code spans, into placeholders.
pub(crate) fn shield_code(text: &str, shielded: &mut Shielded) -> String {
    let fenced = re_fence().replace_all(text, |caps: &Captures<'_>| {
        let lang = match caps.get(1).map(|m| m.as_str()) {
            Some(lang) if !lang.is_empty() => lang,
            _ => "plaintext",
        };
        let body = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
        shielded.push_block(format!(
            "<pre class=\"language-{lang}\"><code>{body}</code></pre>"
        ))
    });
    re_code_span()
        .replace_all(&fenced, |caps: &Captures<'_>| {
            shielded.push_inline(format!("<code>{}</code>", &caps[1]))
        })
        .into_owned()
}

/// Parks the destination of every `[..](url)` so later stages never see it.
pub(crate) fn shield_destinations(text: &str, shielded: &mut Shielded) -> String {
    re_destination()
        .replace_all(text, |caps: &Captures<'_>| {
            format!("]({})", shielded.push_inline(caps[1].to_string()))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fenced_block_becomes_block_placeholder() {
        let mut shielded = Shielded::default();
        let out = shield_code("a\n```rust\nlet x = *y*;\n```\nb", &mut shielded);
        assert_eq!(out, "a\n\u{E002}0\u{E001}\nb");
        assert_eq!(
            shielded.restore(&out),
            "a\n<pre class=\"language-rust\"><code>let x = *y*;</code></pre>\nb"
        );
    }

    #[test]
    fn test_fence_without_language_is_plaintext() {
        let mut shielded = Shielded::default();
        let out = shield_code("```\n  # not a heading  \n```", &mut shielded);
        assert_eq!(
            shielded.restore(&out),
            "<pre class=\"language-plaintext\"><code># not a heading</code></pre>"
        );
    }

    #[test]
    fn test_unterminated_fence_is_left_alone() {
        let mut shielded = Shielded::default();
        let out = shield_code("```rust\nfn main() {}", &mut shielded);
        assert_eq!(out, "```rust\nfn main() {}");
        assert_eq!(shielded.len(), 0);
    }

    #[test]
    fn test_code_span() {
        let mut shielded = Shielded::default();
        let out = shield_code("use `a_b_c` here", &mut shielded);
        assert_eq!(out, "use \u{E000}0\u{E001} here");
        assert_eq!(shielded.restore(&out), "use <code>a_b_c</code> here");
    }

    #[test]
    fn test_destinations_are_parked() {
        let mut shielded = Shielded::default();
        let out = shield_destinations("[a](http://x/_y_) and ](z)", &mut shielded);
        assert_eq!(out, "[a](\u{E000}0\u{E001}) and ](\u{E000}1\u{E001})");
        assert!(shielded.rewrite("\u{E000}0\u{E001}", |url| url.to_uppercase()));
        assert_eq!(shielded.restore(&out), "[a](HTTP://X/_Y_) and ](z)");
    }

    #[test]
    fn test_destination_with_balanced_parentheses() {
        let mut shielded = Shielded::default();
        let out = shield_destinations(
            "[w](https://en.wikipedia.org/wiki/Rust_(language)) (aside)",
            &mut shielded,
        );
        assert_eq!(out, "[w](\u{E000}0\u{E001}) (aside)");
        assert_eq!(
            shielded.restore("\u{E000}0\u{E001}"),
            "https://en.wikipedia.org/wiki/Rust_(language)"
        );
    }

    #[test]
    fn test_destination_holding_code_is_not_parked() {
        let mut shielded = Shielded::default();
        let out = shield_code("[a](`x`)", &mut shielded);
        let out = shield_destinations(&out, &mut shielded);
        assert_eq!(shielded.len(), 1);
        assert_eq!(shielded.restore(&out), "[a](<code>x</code>)");
    }

    #[test]
    fn test_rewrite_rejects_non_tokens() {
        let mut shielded = Shielded::default();
        shielded.push_inline("x".to_string());
        assert!(!shielded.rewrite("a\u{E000}0\u{E001}", str::to_uppercase));
        assert!(!shielded.rewrite("\u{E000}9\u{E001}", str::to_uppercase));
        assert_eq!(shielded.restore("\u{E000}0\u{E001}"), "x");
    }
}

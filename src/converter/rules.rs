//! Ordered pattern/replacement rules shared by the regex-driven stages.

use regex::{Captures, Regex};
use std::borrow::Cow;

/// How a matched span is rewritten.
pub(crate) enum Replacement {
    /// `$n`-style template expanded against the captures.
    Template(&'static str),
    /// Wraps the last capture group in `<tag>…</tag>`. With `lead`, group 1 is
    /// a consumed boundary character that is emitted unchanged before the tag.
    /// A match whose content would leave inline tags unbalanced stays literal.
    Wrap { tag: &'static str, lead: bool },
    /// Arbitrary rewrite.
    With(fn(&Captures<'_>) -> String),
}

/// A stateless (pattern, replacement) pair.
pub(crate) struct TransformationRule {
    pub name: &'static str,
    regex: Regex,
    replacement: Replacement,
}

impl TransformationRule {
    pub fn new(name: &'static str, pattern: &str, replacement: Replacement) -> Self {
        // Patterns are compile-time literals covered by unit tests.
        let regex = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid pattern for rule `{name}`: {e}"));
        Self {
            name,
            regex,
            replacement,
        }
    }

    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match &self.replacement {
            Replacement::Template(template) => self.regex.replace_all(text, *template),
            Replacement::Wrap { tag, lead } => {
                self.regex.replace_all(text, |caps: &Captures<'_>| {
                    let whole = &caps[0];
                    let content = caps
                        .get(caps.len() - 1)
                        .map(|m| m.as_str())
                        .unwrap_or_default();
                    if !inline_tags_balanced(content) {
                        return whole.to_string();
                    }
                    let prefix = if *lead {
                        caps.get(1).map(|m| m.as_str()).unwrap_or_default()
                    } else {
                        ""
                    };
                    format!("{prefix}<{tag}>{content}</{tag}>")
                })
            }
            Replacement::With(rewrite) => self.regex.replace_all(text, *rewrite),
        }
    }
}

/// Applies `rules` in order, each to the output of the previous one.
pub(crate) fn apply_all(rules: &[TransformationRule], text: String) -> String {
    rules.iter().fold(text, |acc, rule| {
        let rewritten = match rule.apply(&acc) {
            Cow::Owned(changed) => Some(changed),
            Cow::Borrowed(_) => None,
        };
        match rewritten {
            Some(changed) => {
                tracing::trace!(rule = rule.name, "rule rewrote text");
                changed
            }
            None => acc,
        }
    })
}

const INLINE_TAGS: [&str; 6] = ["strong", "em", "del", "sup", "sub", "a"];

/// Checks that every inline tag the renderer emits is closed in the right order.
pub(crate) fn inline_tags_balanced(fragment: &str) -> bool {
    let mut stack: Vec<&str> = Vec::new();
    let mut rest = fragment;
    while let Some(start) = rest.find('<') {
        rest = &rest[start + 1..];
        let closing = rest.starts_with('/');
        let name_start = usize::from(closing);
        let name_len = rest[name_start..]
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len() - name_start);
        let name = &rest[name_start..name_start + name_len];
        let Some(tag) = INLINE_TAGS.iter().find(|t| **t == name) else {
            continue;
        };
        if closing {
            if stack.pop() != Some(*tag) {
                return false;
            }
        } else {
            stack.push(tag);
        }
    }
    stack.is_empty()
}

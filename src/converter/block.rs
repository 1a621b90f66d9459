//! Whole-line block rules: headings, horizontal rules and blockquotes.

use super::rules::{Replacement, TransformationRule};
use regex::Captures;
use std::sync::OnceLock;

fn heading(caps: &Captures<'_>) -> String {
    let level = caps[1].len();
    format!("<h{level}>{}</h{level}>", &caps[2])
}

/// Block rules in application order.
pub(crate) fn rules() -> &'static [TransformationRule] {
    static RULES: OnceLock<Vec<TransformationRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            // Exactly 1-6 hashes followed by whitespace; `#######` never matches.
            TransformationRule::new(
                "heading",
                r"(?m)^(#{1,6})[ \t]+(.+?)[ \t]*$",
                Replacement::With(heading),
            ),
            TransformationRule::new(
                "horizontal_rule",
                r"(?m)^[ \t]*(?:\*{3,}|-{3,}|_{3,})[ \t]*$",
                Replacement::Template("<hr/>"),
            ),
            TransformationRule::new(
                "blockquote",
                r"(?m)^[ \t]{0,3}&gt;[ \t]?(.*)$",
                Replacement::Template("<blockquote>$1</blockquote>"),
            ),
        ]
    })
}

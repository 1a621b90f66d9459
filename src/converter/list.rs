//! List stages: task items, bullet items, list wrapping and numbered lines.

use super::rules::{Replacement, TransformationRule};
use regex::Captures;
use std::sync::OnceLock;

const TASK_ITEM_CLASS: &str = "task-list-item";

fn task_item(caps: &Captures<'_>) -> String {
    let checked = if caps[1].eq_ignore_ascii_case("x") {
        " checked"
    } else {
        ""
    };
    let text = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
    format!("<li class=\"{TASK_ITEM_CLASS}\"><input type=\"checkbox\" disabled{checked}> {text}</li>")
}

/// Task items first so the generic bullet rule never sees their `[ ]` marker.
pub(crate) fn item_rules() -> &'static [TransformationRule] {
    static RULES: OnceLock<Vec<TransformationRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            TransformationRule::new(
                "task_item",
                r"(?m)^[ \t]*[-*+][ \t]+\[([ xX])\](?:[ \t]+(.*))?$",
                Replacement::With(task_item),
            ),
            TransformationRule::new(
                "bullet_item",
                r"(?m)^[ \t]*[-*+][ \t]+(.*)$",
                Replacement::Template("<li>$1</li>"),
            ),
        ]
    })
}

/// Numbered lines keep their numeral as visible paragraph text.
pub(crate) fn ordered_rules() -> &'static [TransformationRule] {
    static RULES: OnceLock<Vec<TransformationRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![TransformationRule::new(
            "ordered_item",
            r"(?m)^[ \t]*(\d+)\.[ \t]+(.*)$",
            Replacement::Template("<p>$1. $2</p>"),
        )]
    })
}

/// Wraps each contiguous run of `<li>` lines in exactly one list element.
pub(crate) fn wrap_list_runs(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if line.starts_with("<li") {
            run.push(line);
            continue;
        }
        flush_run(&mut run, &mut out);
        out.push(line);
    }
    flush_run(&mut run, &mut out);

    out.join("\n")
}

fn flush_run<'a>(run: &mut Vec<&'a str>, out: &mut Vec<&'a str>) {
    if run.is_empty() {
        return;
    }
    let task_prefix = format!("<li class=\"{TASK_ITEM_CLASS}\">");
    let is_task_list = run.iter().any(|item| item.starts_with(&task_prefix));
    out.push(if is_task_list {
        "<ul class=\"contains-task-list\">"
    } else {
        "<ul>"
    });
    out.append(run);
    out.push("</ul>");
}

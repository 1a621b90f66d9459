//! Pipe tables: row detection, header promotion and table wrapping.

use super::rules::inline_tags_balanced;
use regex::Regex;
use std::sync::OnceLock;

fn re_row() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[ \t]*\|(.*)\|[ \t]*$").expect("table row pattern"))
}

fn re_separator_cell() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*:?-+:?\s*$").expect("separator cell pattern"))
}

/// One `|cell|cell|` line split into trimmed cells.
#[derive(Debug, Clone, PartialEq)]
struct TableRow<'a> {
    cells: Vec<&'a str>,
}

impl<'a> TableRow<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let caps = re_row().captures(line)?;
        let inner = caps.get(1)?.as_str();
        let cells: Vec<&str> = inner.split('|').map(str::trim).collect();
        // A pipe inside an inline span is not a cell boundary; leave the line as text.
        if !cells.iter().all(|cell| inline_tags_balanced(cell)) {
            return None;
        }
        Some(Self { cells })
    }

    /// A row marks the one above it as a header when any cell is `---`-like.
    fn is_separator(&self) -> bool {
        self.cells.iter().any(|cell| re_separator_cell().is_match(cell))
    }

    fn render(&self, cell_tag: &str, out: &mut Vec<String>) {
        let cells: String = self
            .cells
            .iter()
            .map(|cell| format!("<{cell_tag}>{cell}</{cell_tag}>"))
            .collect();
        out.push(format!("<tr>{cells}</tr>"));
    }
}

/// Replaces each contiguous run of pipe rows with a `<table>`.
pub(crate) fn render_tables(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut run: Vec<TableRow<'_>> = Vec::new();

    for line in text.split('\n') {
        if let Some(row) = TableRow::parse(line) {
            run.push(row);
            continue;
        }
        flush_table(&mut run, &mut out);
        out.push(line.to_string());
    }
    flush_table(&mut run, &mut out);

    out.join("\n")
}

fn flush_table(run: &mut Vec<TableRow<'_>>, out: &mut Vec<String>) {
    if run.is_empty() {
        return;
    }
    let rows = std::mem::take(run);
    out.push("<table>".to_string());

    let header = rows
        .iter()
        .position(TableRow::is_separator)
        .filter(|&separator| separator > 0)
        .map(|separator| separator - 1);

    match header {
        Some(header) => {
            // Rows above the header keep their place in a leading body.
            render_body(&rows[..header], out);
            out.push("<thead>".to_string());
            rows[header].render("th", out);
            out.push("</thead>".to_string());
            render_body(&rows[header + 1..], out);
        }
        None => {
            for row in rows.iter().filter(|row| !row.is_separator()) {
                row.render("td", out);
            }
        }
    }

    out.push("</table>".to_string());
}

fn render_body(rows: &[TableRow<'_>], out: &mut Vec<String>) {
    let mut body = rows.iter().filter(|row| !row.is_separator()).peekable();
    if body.peek().is_none() {
        return;
    }
    out.push("<tbody>".to_string());
    for row in body {
        row.render("td", out);
    }
    out.push("</tbody>".to_string());
}

/// Sentinel characters reserved for shielded fragments. They are stripped from
/// source text so user content can never forge a placeholder.
pub(crate) const INLINE_SENTINEL: char = '\u{E000}';
pub(crate) const SENTINEL_END: char = '\u{E001}';
pub(crate) const BLOCK_SENTINEL: char = '\u{E002}';

/// Tags that survive the escape stage when written literally in the source.
const SAFE_TAGS: [(&str, &str); 2] = [("&lt;br&gt;", "<br>"), ("&lt;hr&gt;", "<hr>")];

/// URL schemes that would execute script when activated.
const SCRIPT_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// Escapes angle brackets so the renderer's own tags are the only real markup.
///
/// Carriage returns are normalized to `\n` and sentinel characters are dropped.
pub fn escape_html(source: &str) -> String {
    let mut escaped = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    escaped.push('\n');
                }
            }
            INLINE_SENTINEL | SENTINEL_END | BLOCK_SENTINEL => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escapes a value for use inside a double-quoted attribute.
///
/// Input has already passed through [`escape_html`], so only quotes remain.
pub fn escape_html_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Restores the literal `<br>` and `<hr>` tags, and nothing else.
pub fn restore_safe_tags(html: &str) -> String {
    let mut restored = html.to_string();
    for (escaped, tag) in SAFE_TAGS {
        if restored.contains(escaped) {
            restored = restored.replace(escaped, tag);
        }
    }
    restored
}

fn has_script_scheme(url: &str, allow_data: bool) -> bool {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    SCRIPT_SCHEMES
        .iter()
        .filter(|scheme| !(allow_data && **scheme == "data:"))
        .any(|scheme| normalized.starts_with(scheme))
}

/// Returns `#` for link targets whose scheme would run script, otherwise the
/// trimmed URL.
pub fn sanitize_link_url(url: &str) -> &str {
    if has_script_scheme(url, false) {
        "#"
    } else {
        url.trim()
    }
}

/// Like [`sanitize_link_url`] but keeps `data:` sources, which images cannot
/// execute.
pub fn sanitize_image_url(url: &str) -> &str {
    if has_script_scheme(url, true) {
        "#"
    } else {
        url.trim()
    }
}

/// Removes the tags the renderer introduced, for contexts that need plain text.
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text
}

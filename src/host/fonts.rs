/// Fonts the status bar cycles through, in order.
pub const FONTS: [&str; 3] = ["Lora", "Inter", "Fira Sans"];

/// Font for a (possibly out-of-range) index; indices wrap around.
pub fn font_at(index: usize) -> &'static str {
    FONTS[index % FONTS.len()]
}

/// CSS custom-property reference for a font, e.g. `var(--font-fira-sans)`.
pub fn css_font_variable(font: &str) -> String {
    format!("var(--font-{})", font.to_lowercase().replacen(' ', "-", 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_at_wraps() {
        assert_eq!(font_at(0), "Lora");
        assert_eq!(font_at(2), "Fira Sans");
        assert_eq!(font_at(3), "Lora");
    }

    #[test]
    fn test_css_font_variable() {
        assert_eq!(css_font_variable("Lora"), "var(--font-lora)");
        assert_eq!(css_font_variable("Fira Sans"), "var(--font-fira-sans)");
    }
}

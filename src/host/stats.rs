/// Counts whitespace-separated words in the trimmed buffer.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Status-bar label, singular only for exactly one word.
pub fn word_count_label(count: usize) -> String {
    if count == 1 {
        "1 word".to_string()
    } else {
        format!("{count} words")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("# Title\n\nsome  words\there"), 5);
    }

    #[test]
    fn test_word_count_label() {
        assert_eq!(word_count_label(0), "0 words");
        assert_eq!(word_count_label(1), "1 word");
        assert_eq!(word_count_label(42), "42 words");
    }
}

//! Categorized writing prompts.

use crate::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const DEFAULT_CATEGORY: &str = "reflection";

const DEFAULT_PROMPTS: [&str; 5] = [
    "# Write about a memory that changed your perspective on life",
    "# Describe a place that feels like home to you",
    "# If you could talk to your younger self, what would you say?",
    "# What would you do if you knew you couldn't fail?",
    "# Write about a skill you've always wanted to learn",
];

/// Prompt library, loaded from JSON of the form
/// `{ "categories": { "name": ["prompt", ...] } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptLibrary {
    categories: BTreeMap<String, Vec<String>>,
}

impl Default for PromptLibrary {
    fn default() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(
            DEFAULT_CATEGORY.to_string(),
            DEFAULT_PROMPTS.iter().map(|p| p.to_string()).collect(),
        );
        Self { categories }
    }
}

impl PromptLibrary {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let library = Self::from_json(&std::fs::read_to_string(path)?)?;
        tracing::debug!(
            path = %path.display(),
            prompts = library.len(),
            "loaded prompt library"
        );
        Ok(library)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Total number of prompts across all categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Picks a prompt uniformly, from one category or from all of them.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R, category: Option<&str>) -> Result<&str> {
        let pool: Vec<&String> = match category {
            Some(name) => self
                .categories
                .get(name)
                .ok_or_else(|| Error::UnknownCategory(name.to_string()))?
                .iter()
                .collect(),
            None => self.categories.values().flatten().collect(),
        };
        pool.choose(rng)
            .copied()
            .map(String::as_str)
            .ok_or(Error::NoPrompts)
    }
}

/// Inserts `prompt` followed by a blank line at `cursor` (in characters,
/// clamped to the buffer). Returns the new buffer and the cursor after the
/// insertion.
pub fn insert_prompt(buffer: &str, cursor: usize, prompt: &str) -> (String, usize) {
    let byte_index = buffer
        .char_indices()
        .nth(cursor)
        .map(|(i, _)| i)
        .unwrap_or(buffer.len());
    let insertion = format!("{prompt}\n\n");
    let mut out = String::with_capacity(buffer.len() + insertion.len());
    out.push_str(&buffer[..byte_index]);
    out.push_str(&insertion);
    out.push_str(&buffer[byte_index..]);
    let new_cursor = buffer[..byte_index].chars().count() + insertion.chars().count();
    (out, new_cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_library() {
        let library = PromptLibrary::default();
        assert_eq!(library.len(), 5);
        assert_eq!(library.categories().collect::<Vec<_>>(), vec!["reflection"]);
    }

    #[test]
    fn test_random_is_from_library() {
        let library = PromptLibrary::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let prompt = library.random(&mut rng, None).expect("prompt");
            assert!(DEFAULT_PROMPTS.contains(&prompt));
        }
    }

    #[test]
    fn test_random_by_category() {
        let library = PromptLibrary::from_json(
            r#"{"categories": {"travel": ["Go north"], "food": ["Bake bread", "Eat soup"]}}"#,
        )
        .expect("parse");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(library.random(&mut rng, Some("travel")).expect("prompt"), "Go north");
        assert!(matches!(
            library.random(&mut rng, Some("poetry")),
            Err(Error::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_empty_library() {
        let library = PromptLibrary::from_json(r#"{"categories": {}}"#).expect("parse");
        assert!(library.is_empty());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(library.random(&mut rng, None), Err(Error::NoPrompts)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            PromptLibrary::from_json("{\"categories\": [1]}"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_insert_prompt_at_cursor() {
        let (text, cursor) = insert_prompt("héllo world", 6, "# P");
        assert_eq!(text, "héllo # P\n\nworld");
        assert_eq!(cursor, 11);
    }

    #[test]
    fn test_insert_prompt_clamps_cursor() {
        let (text, cursor) = insert_prompt("ab", 99, "# P");
        assert_eq!(text, "ab# P\n\n");
        assert_eq!(cursor, 7);
    }
}

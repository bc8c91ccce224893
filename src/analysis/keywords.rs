//! Keyword extraction.

use std::collections::{BTreeSet, HashSet};

use regex::Regex;

/// Common short words never treated as keywords.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see",
    "two", "who", "boy", "did", "its", "let", "put", "say", "she", "too", "use",
];

/// Pulls lowercase alphabetic keywords out of free text.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    word: Regex,
    stopwords: HashSet<String>,
    min_len: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(STOPWORDS.iter().copied())
    }
}

impl KeywordExtractor {
    /// Create an extractor with a custom stopword list.
    pub fn new<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            word: Regex::new(r"\b[a-zA-Z]{3,}\b").unwrap(),
            stopwords: stopwords.into_iter().map(Into::into).collect(),
            min_len: 4,
        }
    }

    /// Distinct keywords of `text`: ASCII words of at least four letters
    /// that are not stopwords.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let lower = text.to_lowercase();
        self.word
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|w| !self.stopwords.contains(*w) && w.len() >= self.min_len)
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keywords() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("Prepare a vegetarian buffet-style dinner menu for a corporate gathering");
        let expected: BTreeSet<String> = [
            "prepare",
            "vegetarian",
            "buffet",
            "style",
            "dinner",
            "menu",
            "corporate",
            "gathering",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(keywords, expected);
    }

    #[test]
    fn test_short_words_and_stopwords_dropped() {
        let extractor = KeywordExtractor::default();
        assert!(extractor.extract("The cat and the dog ran far").is_empty());
    }

    #[test]
    fn test_digits_and_accents_break_words() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("HR2024 café Forms, forms; FORMS");
        assert_eq!(keywords.into_iter().collect::<Vec<_>>(), vec!["forms"]);
    }

    #[test]
    fn test_custom_stopwords() {
        let extractor = KeywordExtractor::new(["travel"]);
        let keywords = extractor.extract("Travel planner for travel groups");
        assert!(keywords.contains("planner"));
        assert!(keywords.contains("groups"));
        assert!(!keywords.contains("travel"));
    }
}

//! Heading shape patterns.

use regex::{RegexSet, RegexSetBuilder};

/// Heading shapes recognised on single spans in outline mode.
pub const OUTLINE_PATTERNS: &[&str] = &[
    r"^\d+\.?\s+[A-Z]",
    r"^[A-Z][A-Z\s]+$",
    r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*$",
    r"^(Chapter|Section|Part)\s+\d+",
    r"^\d+\.\d+\s+",
];

/// Heading shapes recognised on whole blocks when segmenting sections.
/// Matched case-insensitively.
pub const SECTION_PATTERNS: &[&str] = &[
    r"^\d+\.?\s+[A-Z]",
    r"^[A-Z][A-Z\s]+$",
    r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*:?\s*$",
    r"^(Chapter|Section|Part|Abstract|Introduction|Conclusion|References)\s*:?\s*$",
    r"^\d+\.\d+\s+",
];

/// A compiled set of heading patterns, each anchored at the start of the text.
#[derive(Debug, Clone)]
pub struct HeadingPatterns {
    set: RegexSet,
}

impl HeadingPatterns {
    /// Compile a custom pattern set.
    pub fn new<I, S>(patterns: I, case_insensitive: bool) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = RegexSetBuilder::new(patterns)
            .case_insensitive(case_insensitive)
            .build()?;
        Ok(Self { set })
    }

    /// Case-sensitive span patterns for outline mode.
    pub fn outline() -> Self {
        Self::new(OUTLINE_PATTERNS, false).unwrap()
    }

    /// Case-insensitive block patterns for section segmentation.
    pub fn section() -> Self {
        Self::new(SECTION_PATTERNS, true).unwrap()
    }

    /// Check if `text` matches any pattern.
    pub fn matches(&self, text: &str) -> bool {
        self.set.is_match(text)
    }

    /// Number of patterns in the set.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Check if the set holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_patterns() {
        let patterns = HeadingPatterns::outline();
        assert!(patterns.matches("1. Introduction"));
        assert!(patterns.matches("2 Methods"));
        assert!(patterns.matches("OVERVIEW AND SCOPE"));
        assert!(patterns.matches("Related Work"));
        assert!(patterns.matches("Chapter 3"));
        assert!(patterns.matches("4.2 results"));

        assert!(!patterns.matches("the quick brown fox"));
        assert!(!patterns.matches("Related work"));
        assert!(!patterns.matches("chapter 3"));
    }

    #[test]
    fn test_section_patterns_ignore_case() {
        let patterns = HeadingPatterns::section();
        assert!(patterns.matches("introduction:"));
        assert!(patterns.matches("References"));
        assert!(patterns.matches("Key Findings:"));
        assert!(patterns.matches("lowercase words only"));

        assert!(!patterns.matches("Costs rose by 12% in 2023."));
        assert!(!patterns.matches("Introduction to the budget, revised"));
    }

    #[test]
    fn test_custom_patterns() {
        let patterns = HeadingPatterns::new([r"^Appendix [A-Z]$"], false).unwrap();
        assert_eq!(patterns.len(), 1);
        assert!(patterns.matches("Appendix B"));
        assert!(!patterns.matches("appendix b"));

        assert!(HeadingPatterns::new(["("], false).is_err());
    }
}

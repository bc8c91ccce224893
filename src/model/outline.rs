//! Outline-mode output types.

use serde::{Deserialize, Serialize};

/// Heading level in the outline. Finer hierarchies collapse into `H3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Map a tier index (0 = largest distinct size) to a level.
    pub fn from_tier(tier: usize) -> Self {
        match tier {
            0 => HeadingLevel::H1,
            1 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// Numeric depth (1-3).
    pub fn depth(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// One heading in the outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
}

/// Title and heading outline of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutline {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// Title used when no title candidate survives.
    pub const UNTITLED: &'static str = "Untitled Document";
    /// Title reported for a document without extractable spans.
    pub const EMPTY: &'static str = "Empty Document";
    /// Title reported for a document that failed to ingest.
    pub const ERROR: &'static str = "Error Processing Document";

    /// Create an outline.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Sentinel for a document with no spans.
    pub fn empty_document() -> Self {
        Self::new(Self::EMPTY, Vec::new())
    }

    /// Sentinel for a document that could not be processed.
    pub fn processing_error() -> Self {
        Self::new(Self::ERROR, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_tier_caps_at_h3() {
        assert_eq!(HeadingLevel::from_tier(0), HeadingLevel::H1);
        assert_eq!(HeadingLevel::from_tier(1), HeadingLevel::H2);
        assert_eq!(HeadingLevel::from_tier(2), HeadingLevel::H3);
        assert_eq!(HeadingLevel::from_tier(7), HeadingLevel::H3);
    }

    #[test]
    fn test_outline_json_shape() {
        let outline = DocumentOutline::new(
            "Guide",
            vec![OutlineEntry {
                level: HeadingLevel::H2,
                text: "Setup".to_string(),
                page: 3,
            }],
        );
        let json = serde_json::to_value(&outline).unwrap();
        assert_eq!(json["title"], "Guide");
        assert_eq!(json["outline"][0]["level"], "H2");
        assert_eq!(json["outline"][0]["page"], 3);
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(DocumentOutline::empty_document().title, "Empty Document");
        assert_eq!(
            DocumentOutline::processing_error().title,
            "Error Processing Document"
        );
        assert!(DocumentOutline::processing_error().outline.is_empty());
    }
}

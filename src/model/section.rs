//! Persona-mode sections and subsections.

use serde::{Deserialize, Serialize};

/// A contiguous run of a page's content, the unit of relevance ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Source document name
    pub document: String,
    /// 1-based page number
    pub page: u32,
    /// Heading text (at most 100 characters) or "Page {n}"
    pub title: String,
    /// Raw block text, newline separated
    pub content: String,
    /// Font sizes of every span folded into the section
    #[serde(skip)]
    pub font_sizes: Vec<f32>,
    /// Whether the section was opened by a heading-like block
    pub is_heading_origin: bool,
    /// Relevance score, filled in by the scorer
    pub relevance_score: f64,
}

impl Section {
    /// Section opened at the top of a page before any heading.
    pub fn page_start(document: impl Into<String>, page: u32) -> Self {
        Self {
            document: document.into(),
            page,
            title: format!("Page {}", page),
            content: String::new(),
            font_sizes: Vec::new(),
            is_heading_origin: false,
            relevance_score: 0.0,
        }
    }

    /// Check if the section carries any non-whitespace content.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Return a copy carrying the given score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.relevance_score = score;
        self
    }
}

/// A refined paragraph-level excerpt of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    pub document: String,
    #[serde(rename = "page_number")]
    pub page: u32,
    pub refined_text: String,
    pub relevance_score: f64,
}

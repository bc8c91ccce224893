//! Section segmentation for persona mode.

use super::options::SegmentOptions;
use super::patterns::HeadingPatterns;
use crate::model::{DocumentLayout, LayoutBlock, PageLayout, Section};

/// Splits each page into sections at heading-like blocks.
#[derive(Debug, Clone)]
pub struct SectionSegmenter {
    options: SegmentOptions,
    patterns: HeadingPatterns,
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new(SegmentOptions::default(), HeadingPatterns::section())
    }
}

/// Text and span sizes of one block.
struct BlockText {
    text: String,
    sizes: Vec<f32>,
}

impl BlockText {
    fn from_block(block: &LayoutBlock) -> Self {
        let mut text = String::new();
        let mut sizes = Vec::new();

        for line in &block.lines {
            let mut line_text = String::new();
            for span in &line.spans {
                let t = span.text.trim();
                if !t.is_empty() {
                    line_text.push_str(t);
                    line_text.push(' ');
                    sizes.push(span.font_size);
                }
            }
            if !line_text.trim().is_empty() {
                text.push_str(&line_text);
                text.push('\n');
            }
        }

        Self { text, sizes }
    }

    fn mean_size(&self) -> Option<f64> {
        if self.sizes.is_empty() {
            None
        } else {
            let sum: f64 = self.sizes.iter().map(|&s| f64::from(s)).sum();
            Some(sum / self.sizes.len() as f64)
        }
    }
}

impl SectionSegmenter {
    /// Create a segmenter.
    pub fn new(options: SegmentOptions, patterns: HeadingPatterns) -> Self {
        Self { options, patterns }
    }

    /// Segment every page of a document.
    pub fn segment(&self, layout: &DocumentLayout) -> Vec<Section> {
        let mut sections = Vec::new();
        for page in &layout.pages {
            self.segment_page(&layout.name, page, &mut sections);
        }
        log::debug!("{}: {} sections", layout.name, sections.len());
        sections
    }

    fn segment_page(&self, document: &str, page: &PageLayout, out: &mut Vec<Section>) {
        let mut current = Section::page_start(document, page.number);

        for block in &page.blocks {
            let block = BlockText::from_block(block);
            let trimmed = block.text.trim();
            if trimmed.is_empty() {
                continue;
            }

            if self.is_boundary(trimmed, &block) {
                let title: String = trimmed.chars().take(self.options.max_title_length).collect();
                let next = Section {
                    document: document.to_string(),
                    page: page.number,
                    title,
                    content: block.text,
                    font_sizes: block.sizes,
                    is_heading_origin: true,
                    relevance_score: 0.0,
                };
                let finished = std::mem::replace(&mut current, next);
                if finished.has_content() {
                    out.push(finished);
                }
            } else {
                current.content.push_str(&block.text);
                current.font_sizes.extend(block.sizes);
            }
        }

        if current.has_content() {
            out.push(current);
        }
    }

    fn is_boundary(&self, trimmed: &str, block: &BlockText) -> bool {
        if trimmed.chars().count() > self.options.max_heading_length {
            return false;
        }
        if block
            .mean_size()
            .is_some_and(|mean| mean > f64::from(self.options.heading_size))
        {
            return true;
        }
        self.patterns.matches(trimmed)
    }
}

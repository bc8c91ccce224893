//! Span-level heading classification.

use super::options::HeadingThresholds;
use super::patterns::HeadingPatterns;
use super::stats::DocumentFontProfile;
use crate::model::TextSpan;

/// Why a span was accepted as a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingReason {
    /// Font noticeably larger than the document norm
    Size,
    /// Bold flag set
    Bold,
    /// Text has a heading shape
    Pattern,
}

/// A span together with its classification outcome.
#[derive(Debug, Clone, Copy)]
pub struct HeadingCandidate<'a> {
    pub span: &'a TextSpan,
    pub reason: Option<HeadingReason>,
}

impl HeadingCandidate<'_> {
    /// Check if the span was accepted.
    pub fn is_heading(&self) -> bool {
        self.reason.is_some()
    }
}

/// Decides whether a span is a heading from its size, weight and shape.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    thresholds: HeadingThresholds,
    patterns: HeadingPatterns,
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new(HeadingThresholds::default(), HeadingPatterns::outline())
    }
}

impl HeadingClassifier {
    /// Create a classifier with the given thresholds and patterns.
    pub fn new(thresholds: HeadingThresholds, patterns: HeadingPatterns) -> Self {
        Self {
            thresholds,
            patterns,
        }
    }

    /// Classify one span against the document profile.
    pub fn classify<'a>(
        &self,
        span: &'a TextSpan,
        profile: &DocumentFontProfile,
    ) -> HeadingCandidate<'a> {
        HeadingCandidate {
            span,
            reason: self.reason(span, profile),
        }
    }

    /// Check if a span is a heading.
    pub fn is_heading(&self, span: &TextSpan, profile: &DocumentFontProfile) -> bool {
        self.reason(span, profile).is_some()
    }

    fn reason(&self, span: &TextSpan, profile: &DocumentFontProfile) -> Option<HeadingReason> {
        let t = &self.thresholds;
        if span.char_len() > t.max_length || span.font_size < t.min_font_size {
            return None;
        }

        if f64::from(span.font_size) >= profile.size_threshold(t.mean_margin, t.modal_margin) {
            return Some(HeadingReason::Size);
        }

        if span.is_bold {
            return Some(HeadingReason::Bold);
        }

        if self.patterns.matches(span.text.trim()) {
            return Some(HeadingReason::Pattern);
        }

        None
    }
}

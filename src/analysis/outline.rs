//! Outline extraction (title plus H1-H3 headings).

use std::collections::HashSet;

use super::classifier::HeadingClassifier;
use super::options::AnalysisOptions;
use super::patterns::HeadingPatterns;
use super::stats::DocumentFontProfile;
use super::title::TitleResolver;
use crate::model::{DocumentLayout, DocumentOutline, HeadingLevel, OutlineEntry, TextSpan};

/// Builds a [`DocumentOutline`] from an ingested layout.
#[derive(Debug, Clone, Default)]
pub struct OutlineBuilder {
    classifier: HeadingClassifier,
    title: TitleResolver,
}

impl OutlineBuilder {
    /// Create a builder from analysis options.
    pub fn new(options: &AnalysisOptions) -> Self {
        Self {
            classifier: HeadingClassifier::new(options.headings, HeadingPatterns::outline()),
            title: TitleResolver::default(),
        }
    }

    /// Use a custom classifier.
    pub fn with_classifier(mut self, classifier: HeadingClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Extract the title and heading outline.
    ///
    /// Only spans longer than one character take part. A layout without such
    /// spans yields the "Empty Document" sentinel.
    pub fn build(&self, layout: &DocumentLayout) -> DocumentOutline {
        let spans = layout.outline_spans();
        let Some(profile) = DocumentFontProfile::from_sizes(spans.iter().map(|s| s.font_size))
        else {
            log::warn!("{}: no text spans", layout.name);
            return DocumentOutline::empty_document();
        };

        log::debug!(
            "{}: {} spans, mean size {:.2}, modal size {:.2}",
            layout.name,
            profile.samples,
            profile.mean_size,
            profile.modal_size
        );

        let title = self.title.resolve(spans.iter().copied());

        let mut seen = HashSet::new();
        let headings: Vec<&TextSpan> = spans
            .iter()
            .copied()
            .filter(|span| self.classifier.is_heading(span, &profile))
            .filter(|span| seen.insert(span.text.as_str()))
            .collect();

        let tiers = size_tiers(&headings);
        let outline = headings
            .into_iter()
            .map(|span| OutlineEntry {
                level: level_for(span.font_size, &tiers),
                text: span.text.clone(),
                page: span.page,
            })
            .collect();

        DocumentOutline::new(title, outline)
    }
}

/// Extract an outline with default options.
pub fn extract_outline(layout: &DocumentLayout) -> DocumentOutline {
    OutlineBuilder::default().build(layout)
}

/// Distinct heading sizes, largest first.
fn size_tiers(headings: &[&TextSpan]) -> Vec<f32> {
    let mut sizes: Vec<f32> = Vec::new();
    for span in headings {
        if !sizes.contains(&span.font_size) {
            sizes.push(span.font_size);
        }
    }
    sizes.sort_by(|a, b| b.total_cmp(a));
    sizes
}

fn level_for(size: f32, tiers: &[f32]) -> HeadingLevel {
    let tier = tiers.iter().position(|&t| t == size).unwrap_or(tiers.len());
    HeadingLevel::from_tier(tier)
}

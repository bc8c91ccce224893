//! Persona-driven ranking of sections and subsections.

use rayon::prelude::*;

use super::keywords::KeywordExtractor;
use super::options::AnalysisOptions;
use super::patterns::HeadingPatterns;
use super::scorer::{RelevanceQuery, RelevanceScorer};
use super::segment::SectionSegmenter;
use super::subsection::SubsectionExtractor;
use crate::model::{
    AnalysisReport, DocumentLayout, ExtractedSection, PersonaTask, ReportMetadata, Section,
    Subsection,
};

/// Ranks the sections of a document collection for a persona and job.
#[derive(Debug, Clone)]
pub struct PersonaAnalyzer {
    options: AnalysisOptions,
    segmenter: SectionSegmenter,
    keywords: KeywordExtractor,
    subsections: SubsectionExtractor,
}

impl Default for PersonaAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisOptions::default())
    }
}

impl PersonaAnalyzer {
    /// Create an analyzer.
    pub fn new(options: AnalysisOptions) -> Self {
        Self {
            segmenter: SectionSegmenter::new(options.segment, HeadingPatterns::section()),
            keywords: KeywordExtractor::default(),
            subsections: SubsectionExtractor::new(options.limits),
            options,
        }
    }

    /// Use a custom keyword extractor.
    pub fn with_keywords(mut self, keywords: KeywordExtractor) -> Self {
        self.keywords = keywords;
        self
    }

    /// Segment every document, keeping document order.
    pub fn sections(&self, layouts: &[DocumentLayout]) -> Vec<Section> {
        let per_document: Vec<Vec<Section>> = if self.options.is_parallel() {
            layouts.par_iter().map(|l| self.segmenter.segment(l)).collect()
        } else {
            layouts.iter().map(|l| self.segmenter.segment(l)).collect()
        };
        per_document.into_iter().flatten().collect()
    }

    /// Score, rank and select sections and subsections.
    ///
    /// Every layout is listed in `input_documents`. Sections are ordered by
    /// descending score with ties kept in document order, and the top ones
    /// are mined for subsections.
    pub fn analyze(
        &self,
        layouts: &[DocumentLayout],
        task: &PersonaTask,
        timestamp: impl Into<String>,
    ) -> AnalysisReport {
        let limits = &self.options.limits;
        let scorer = RelevanceScorer::new(
            RelevanceQuery::from_task(task, &self.keywords),
            self.options.weights,
        );

        let mut sections = self.score_sections(self.sections(layouts), &scorer);
        sections.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        sections.truncate(limits.max_sections);

        let extracted_sections = sections
            .iter()
            .enumerate()
            .map(|(i, s)| ExtractedSection {
                document: s.document.clone(),
                page_number: s.page,
                section_title: s.title.clone(),
                importance_rank: i as u32 + 1,
            })
            .collect();

        let mut subsection_analysis: Vec<Subsection> = sections
            .iter()
            .take(limits.sections_for_subsections)
            .flat_map(|s| self.subsections.extract(s, &scorer))
            .collect();
        subsection_analysis.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        subsection_analysis.truncate(limits.max_subsections);

        log::info!(
            "Ranked {} sections from {} documents",
            sections.len(),
            layouts.len()
        );

        AnalysisReport {
            metadata: ReportMetadata {
                input_documents: layouts.iter().map(|l| l.name.clone()).collect(),
                persona: task.persona.clone(),
                job_to_be_done: task.job.clone(),
                processing_timestamp: timestamp.into(),
            },
            extracted_sections,
            subsection_analysis,
        }
    }

    fn score_sections(&self, sections: Vec<Section>, scorer: &RelevanceScorer) -> Vec<Section> {
        if self.options.is_parallel() {
            sections
                .into_par_iter()
                .map(|s| {
                    let score = scorer.score_section(&s);
                    s.with_score(score)
                })
                .collect()
        } else {
            sections
                .into_iter()
                .map(|s| {
                    let score = scorer.score_section(&s);
                    s.with_score(score)
                })
                .collect()
        }
    }
}

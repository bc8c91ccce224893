//! Lexical relevance scoring.

use std::collections::BTreeSet;

use super::keywords::KeywordExtractor;
use super::options::ScoringWeights;
use crate::model::{PersonaTask, Section};

/// Keywords of a persona and its job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelevanceQuery {
    pub persona_keywords: BTreeSet<String>,
    pub job_keywords: BTreeSet<String>,
}

impl RelevanceQuery {
    /// Extract the query keywords of a task.
    pub fn from_task(task: &PersonaTask, extractor: &KeywordExtractor) -> Self {
        Self {
            persona_keywords: extractor.extract(&task.persona),
            job_keywords: extractor.extract(&task.job),
        }
    }
}

/// Scores sections and paragraphs against a persona query.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    query: RelevanceQuery,
    weights: ScoringWeights,
}

impl RelevanceScorer {
    /// Create a scorer.
    pub fn new(query: RelevanceQuery, weights: ScoringWeights) -> Self {
        Self { query, weights }
    }

    /// Create a scorer for a task with the default extractor.
    pub fn for_task(task: &PersonaTask, weights: ScoringWeights) -> Self {
        Self::new(
            RelevanceQuery::from_task(task, &KeywordExtractor::default()),
            weights,
        )
    }

    /// The query keywords.
    pub fn query(&self) -> &RelevanceQuery {
        &self.query
    }

    /// Score a whole section.
    ///
    /// A keyword hits when it occurs anywhere in the lowercased content or
    /// title. Longer sections and sections opened by a heading score higher.
    pub fn score_section(&self, section: &Section) -> f64 {
        let w = &self.weights;
        let content = section.content.to_lowercase();
        let title = section.title.to_lowercase();
        let hits = |keywords: &BTreeSet<String>| {
            keywords
                .iter()
                .filter(|k| content.contains(k.as_str()) || title.contains(k.as_str()))
                .count() as f64
        };

        let persona = hits(&self.query.persona_keywords);
        let job = hits(&self.query.job_keywords);
        let length = (content.chars().count() as f64 / w.length_norm).min(1.0);
        let bonus = if section.is_heading_origin {
            w.heading_bonus
        } else {
            0.0
        };

        persona * w.persona + job * w.job + length * w.length + bonus
    }

    /// Score a paragraph, normalised by the square root of its word count.
    pub fn score_paragraph(&self, text: &str) -> f64 {
        let words = text.split_whitespace().count();
        if words == 0 {
            return 0.0;
        }

        let lower = text.to_lowercase();
        let matches = |keywords: &BTreeSet<String>| {
            keywords.iter().filter(|k| lower.contains(k.as_str())).count() as f64
        };

        let w = &self.weights;
        let raw = matches(&self.query.persona_keywords) * w.paragraph_persona
            + matches(&self.query.job_keywords) * w.paragraph_job;
        raw / (words as f64).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> RelevanceScorer {
        let task = PersonaTask::new("Food Contractor", "Prepare a vegetarian dinner menu");
        RelevanceScorer::for_task(&task, ScoringWeights::default())
    }

    fn section(title: &str, content: &str, heading: bool) -> Section {
        let mut s = Section::page_start("menu.pdf", 1);
        s.title = title.to_string();
        s.content = content.to_string();
        s.is_heading_origin = heading;
        s
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_query_keywords() {
        let s = scorer();
        assert!(s.query().persona_keywords.contains("contractor"));
        assert!(s.query().job_keywords.contains("vegetarian"));
        assert!(!s.query().job_keywords.contains("a"));
    }

    #[test]
    fn test_section_score_components() {
        let s = scorer();
        // 100 characters, 2 job hits ("vegetarian", "dinner"), heading bonus
        let content = format!("{:<100}", "vegetarian dinner ideas");
        let score = s.score_section(&section("Mains", &content, true));
        assert!(close(score, 2.0 * 0.4 + 0.1 * 0.2 + 0.2));

        let plain = s.score_section(&section("Mains", &content, false));
        assert!(close(score - plain, 0.2));
    }

    #[test]
    fn test_title_hits_count() {
        let s = scorer();
        let score = s.score_section(&section("Food for a crowd", "", false));
        assert!(close(score, 0.3));
    }

    #[test]
    fn test_length_term_saturates() {
        let s = scorer();
        let long = "x".repeat(5000);
        assert!(close(s.score_section(&section("Notes", &long, false)), 0.2));
    }

    #[test]
    fn test_paragraph_score() {
        let s = scorer();
        assert_eq!(s.score_paragraph("   "), 0.0);
        assert_eq!(s.score_paragraph("Nothing relevant here at all"), 0.0);

        // 4 words, one persona hit and one job hit
        let score = s.score_paragraph("Contractor serves vegetarian lasagna");
        assert!(close(score, (0.4 + 0.6) / 2.0));
    }
}

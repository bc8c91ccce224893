//! Subsection extraction.

use regex::Regex;

use super::options::SelectionLimits;
use super::scorer::RelevanceScorer;
use crate::model::{Section, Subsection};

/// Cleans paragraphs into short standalone excerpts.
#[derive(Debug, Clone)]
pub struct TextRefiner {
    whitespace: Regex,
    disallowed: Regex,
}

impl Default for TextRefiner {
    fn default() -> Self {
        Self {
            whitespace: Regex::new(r"\s+").unwrap(),
            disallowed: Regex::new(r"[^\w\s.,!?;:()\-]").unwrap(),
        }
    }
}

impl TextRefiner {
    /// Collapse whitespace, drop characters other than word characters and
    /// `.,!?;:()-`, trim, and capitalise the first letter.
    pub fn refine(&self, text: &str) -> String {
        let collapsed = self.whitespace.replace_all(text, " ");
        let cleaned = self.disallowed.replace_all(&collapsed, "");
        // Removing characters can leave runs of spaces behind
        let cleaned = self.whitespace.replace_all(&cleaned, " ");
        capitalize_first(cleaned.trim())
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Refine text with the default refiner.
pub fn refine_text(text: &str) -> String {
    TextRefiner::default().refine(text)
}

/// Mines the best paragraphs of a section.
#[derive(Debug, Clone)]
pub struct SubsectionExtractor {
    refiner: TextRefiner,
    limits: SelectionLimits,
}

impl SubsectionExtractor {
    /// Create an extractor.
    pub fn new(limits: SelectionLimits) -> Self {
        Self {
            refiner: TextRefiner::default(),
            limits,
        }
    }

    /// Extract up to `subsections_per_section` scored excerpts.
    ///
    /// Candidates are the first `paragraphs_per_section` lines of the content
    /// longer than `min_paragraph_length` once trimmed. Refined excerpts not
    /// longer than `min_refined_length` are dropped. Equal scores keep
    /// paragraph order.
    pub fn extract(&self, section: &Section, scorer: &RelevanceScorer) -> Vec<Subsection> {
        let mut subsections: Vec<Subsection> = section
            .content
            .split('\n')
            .map(str::trim)
            .filter(|p| p.chars().count() > self.limits.min_paragraph_length)
            .take(self.limits.paragraphs_per_section)
            .map(|p| self.refiner.refine(p))
            .filter(|r| r.chars().count() > self.limits.min_refined_length)
            .map(|refined_text| Subsection {
                document: section.document.clone(),
                page: section.page,
                relevance_score: scorer.score_paragraph(&refined_text),
                refined_text,
            })
            .collect();

        subsections.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        subsections.truncate(self.limits.subsections_per_section);
        subsections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::options::ScoringWeights;
    use crate::model::PersonaTask;

    #[test]
    fn test_refine_text() {
        assert_eq!(
            refine_text("  the   menu:\tsoup — salad & bread!  "),
            "The menu: soup salad bread!"
        );
        assert_eq!(refine_text("über café (2024)"), "Über café (2024)");
        assert_eq!(refine_text("★★★"), "");
    }

    #[test]
    fn test_refined_text_invariants() {
        let text = refine_text("line one\nline two ~ with * stars\r\n and 50% off");
        assert!(!text.contains('\n'));
        assert!(!text.contains("  "));
        assert!(!text.contains('*') && !text.contains('%') && !text.contains('~'));
        assert!(text.starts_with('L'));
    }

    #[test]
    fn test_extract_keeps_top_three_in_score_order() {
        let task = PersonaTask::new("Chef", "Plan vegetarian dishes");
        let scorer = RelevanceScorer::for_task(&task, ScoringWeights::default());

        let filler = "nothing to see in this particular line of generic prose text";
        let hit = "vegetarian dishes are listed in this line of the document";
        let mut section = crate::model::Section::page_start("a.pdf", 3);
        section.content = [
            filler, "too short", hit, filler, filler, filler, hit,
        ]
        .join("\n");

        let extractor = SubsectionExtractor::new(SelectionLimits::default());
        let subs = extractor.extract(&section, &scorer);

        // The second `hit` is the sixth long paragraph, beyond the first five
        assert_eq!(subs.len(), 3);
        assert!(subs[0].refined_text.starts_with("Vegetarian dishes"));
        assert!(subs[1].refined_text.starts_with("Nothing"));
        assert!(subs[2].refined_text.starts_with("Nothing"));
        assert!(subs.iter().all(|s| s.page == 3 && s.document == "a.pdf"));
        assert!(subs[0].relevance_score > subs[1].relevance_score);
    }
}

//! Persona-mode report.

use serde::{Deserialize, Serialize};

use super::Subsection;

/// Persona and job description used as the relevance query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaTask {
    pub persona: String,
    pub job: String,
}

impl PersonaTask {
    /// Persona used when none is supplied.
    pub const DEFAULT_PERSONA: &'static str = "General Researcher";
    /// Job used when none is supplied.
    pub const DEFAULT_JOB: &'static str = "Extract key information from documents";

    /// Create a persona/job pair.
    pub fn new(persona: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            job: job.into(),
        }
    }
}

impl Default for PersonaTask {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERSONA, Self::DEFAULT_JOB)
    }
}

/// Report metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    /// Local ISO-8601 timestamp
    pub processing_timestamp: String,
}

/// One ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub page_number: u32,
    pub section_title: String,
    /// 1-based rank
    pub importance_rank: u32,
}

/// Ranked sections and subsections for a document collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<Subsection>,
}

impl AnalysisReport {
    /// Report with no documents and no results.
    pub fn empty(task: &PersonaTask, timestamp: impl Into<String>) -> Self {
        Self {
            metadata: ReportMetadata {
                input_documents: Vec::new(),
                persona: task.persona.clone(),
                job_to_be_done: task.job.clone(),
                processing_timestamp: timestamp.into(),
            },
            extracted_sections: Vec::new(),
            subsection_analysis: Vec::new(),
        }
    }
}

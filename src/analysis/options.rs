//! Analysis options.

/// Thresholds used by the outline-mode heading classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingThresholds {
    /// Spans smaller than this are never headings
    pub min_font_size: f32,

    /// Spans longer than this (in characters) are never headings
    pub max_length: usize,

    /// Margin over the mean size for the size rule
    pub mean_margin: f32,

    /// Margin over the modal size for the size rule
    pub modal_margin: f32,
}

impl Default for HeadingThresholds {
    fn default() -> Self {
        Self {
            min_font_size: 10.0,
            max_length: 200,
            mean_margin: 2.0,
            modal_margin: 1.0,
        }
    }
}

/// Options for splitting pages into sections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentOptions {
    /// Blocks whose mean span size exceeds this start a section
    pub heading_size: f32,

    /// Blocks longer than this (in characters) never start a section
    pub max_heading_length: usize,

    /// Section titles are truncated to this many characters
    pub max_title_length: usize,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            heading_size: 12.0,
            max_heading_length: 200,
            max_title_length: 100,
        }
    }
}

/// Weights of the lexical relevance score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub persona: f64,
    pub job: f64,
    pub length: f64,
    pub heading_bonus: f64,

    /// Content length (in characters) at which the length term saturates
    pub length_norm: f64,

    pub paragraph_persona: f64,
    pub paragraph_job: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            persona: 0.3,
            job: 0.4,
            length: 0.2,
            heading_bonus: 0.2,
            length_norm: 1000.0,
            paragraph_persona: 0.4,
            paragraph_job: 0.6,
        }
    }
}

/// Top-k cutoffs for ranking and subsection extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionLimits {
    /// Sections reported in `extracted_sections`
    pub max_sections: usize,

    /// Top sections mined for subsections
    pub sections_for_subsections: usize,

    /// Subsections reported in `subsection_analysis`
    pub max_subsections: usize,

    /// Paragraph candidates considered per section
    pub paragraphs_per_section: usize,

    /// Subsections kept per section
    pub subsections_per_section: usize,

    /// Paragraphs must be longer than this (trimmed, in characters)
    pub min_paragraph_length: usize,

    /// Refined paragraphs must be longer than this (in characters)
    pub min_refined_length: usize,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            max_sections: 10,
            sections_for_subsections: 5,
            max_subsections: 10,
            paragraphs_per_section: 5,
            subsections_per_section: 3,
            min_paragraph_length: 50,
            min_refined_length: 30,
        }
    }
}

/// All tunables of the analysis pipeline.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub headings: HeadingThresholds,
    pub segment: SegmentOptions,
    pub weights: ScoringWeights,
    pub limits: SelectionLimits,

    /// Run per-document and per-section work on the rayon pool
    pub parallel: Parallelism,
}

/// Whether to spread work across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    #[default]
    Parallel,
    Sequential,
}

impl AnalysisOptions {
    /// Create new analysis options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set heading thresholds.
    pub fn with_headings(mut self, headings: HeadingThresholds) -> Self {
        self.headings = headings;
        self
    }

    /// Set segmentation options.
    pub fn with_segment(mut self, segment: SegmentOptions) -> Self {
        self.segment = segment;
        self
    }

    /// Set scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set selection limits.
    pub fn with_limits(mut self, limits: SelectionLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Run everything on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = Parallelism::Sequential;
        self
    }

    /// Check if parallel execution is enabled.
    pub fn is_parallel(&self) -> bool {
        self.parallel == Parallelism::Parallel
    }
}

//! Structure inference and relevance ranking.
//!
//! Outline mode runs [`DocumentFontProfile`] → [`HeadingClassifier`] /
//! [`TitleResolver`] → [`OutlineBuilder`]. Persona mode runs
//! [`SectionSegmenter`] → [`RelevanceScorer`] → [`SubsectionExtractor`] →
//! [`PersonaAnalyzer`].

mod classifier;
mod keywords;
mod options;
mod outline;
mod patterns;
mod ranking;
mod scorer;
mod segment;
mod stats;
mod subsection;
mod title;

pub use classifier::{HeadingCandidate, HeadingClassifier, HeadingReason};
pub use keywords::{KeywordExtractor, STOPWORDS};
pub use options::{
    AnalysisOptions, HeadingThresholds, Parallelism, ScoringWeights, SegmentOptions,
    SelectionLimits,
};
pub use outline::{extract_outline, OutlineBuilder};
pub use patterns::{HeadingPatterns, OUTLINE_PATTERNS, SECTION_PATTERNS};
pub use ranking::PersonaAnalyzer;
pub use scorer::{RelevanceQuery, RelevanceScorer};
pub use segment::SectionSegmenter;
pub use stats::DocumentFontProfile;
pub use subsection::{refine_text, SubsectionExtractor, TextRefiner};
pub use title::TitleResolver;

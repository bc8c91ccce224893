//! # docsift
//!
//! Document structure inference and persona-driven section ranking from
//! page-layout metadata.
//!
//! Documents are read as styled text spans (page, font size, weight flags,
//! bounding box), either from a PDF or from a JSON span dump. From those
//! spans the library infers:
//!
//! - **Outline mode**: the document title and an H1/H2/H3 heading outline.
//! - **Persona mode**: the sections and paragraphs of a document collection
//!   that matter most to a persona and the job it is trying to get done.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::{outline_file, render, JsonFormat};
//!
//! fn main() -> docsift::Result<()> {
//!     let outline = outline_file("document.pdf")?;
//!     println!("{}", render::to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Persona mode
//!
//! ```no_run
//! use docsift::{Docsift, PersonaTask};
//!
//! let task = PersonaTask::new("Food Contractor", "Prepare a vegetarian buffet menu");
//! let report = Docsift::new()
//!     .lenient()
//!     .analyze(["menu.pdf", "sides.pdf"], &task)?;
//! println!("{}", report.extracted_sections.len());
//! # Ok::<(), docsift::Error>(())
//! ```

pub mod analysis;
pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use analysis::{
    AnalysisOptions, HeadingThresholds, OutlineBuilder, PersonaAnalyzer, ScoringWeights,
    SegmentOptions, SelectionLimits,
};
pub use batch::{run_outline_batch, run_persona_batch, BatchOptions};
pub use detect::{detect_kind_from_bytes, detect_kind_from_path, SourceKind};
pub use error::{Error, Result};
pub use model::{
    AnalysisReport, DocumentLayout, DocumentOutline, HeadingLevel, OutlineEntry, PersonaTask,
    Section, Subsection, TextSpan,
};
pub use parser::{ErrorMode, IngestOptions, SpanSource};
pub use render::JsonFormat;

use std::path::Path;
use std::time::Duration;

/// Read a PDF or span dump into a layout with default options.
///
/// # Example
///
/// ```no_run
/// let layout = docsift::read_layout("document.pdf").unwrap();
/// println!("Pages: {}", layout.page_count());
/// ```
pub fn read_layout<P: AsRef<Path>>(path: P) -> Result<DocumentLayout> {
    parser::ingest_path(path, &IngestOptions::default())
}

/// Extract the title and heading outline of a file.
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    Docsift::new().outline(path)
}

/// Builder tying ingestion and analysis options together.
///
/// # Example
///
/// ```no_run
/// use docsift::Docsift;
///
/// let outline = Docsift::new()
///     .lenient()
///     .sequential()
///     .with_max_spans_per_page(2000)
///     .outline("document.pdf")?;
/// # Ok::<(), docsift::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Docsift {
    ingest: IngestOptions,
    analysis: AnalysisOptions,
}

impl Docsift {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip unreadable pages instead of failing the document.
    pub fn lenient(mut self) -> Self {
        self.ingest = self.ingest.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.analysis = self.analysis.sequential();
        self
    }

    /// Cap the spans kept per page.
    pub fn with_max_spans_per_page(mut self, max: usize) -> Self {
        self.ingest = self.ingest.with_max_spans_per_page(max);
        self
    }

    /// Bound the time spent reading each document.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.ingest = self.ingest.with_time_budget(budget);
        self
    }

    /// Replace the analysis options.
    pub fn with_analysis(mut self, analysis: AnalysisOptions) -> Self {
        self.analysis = analysis;
        self
    }

    /// Read a document into a layout.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<DocumentLayout> {
        parser::ingest_path(path, &self.ingest)
    }

    /// Extract the outline of a document.
    pub fn outline<P: AsRef<Path>>(&self, path: P) -> Result<DocumentOutline> {
        let layout = self.read(path)?;
        Ok(OutlineBuilder::new(&self.analysis).build(&layout))
    }

    /// Rank the sections of several documents for a persona.
    ///
    /// Any document that fails to read fails the call; use
    /// [`batch::run_persona_batch`] to skip failures instead.
    pub fn analyze<I, P>(&self, paths: I, task: &PersonaTask) -> Result<AnalysisReport>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let layouts = paths
            .into_iter()
            .map(|p| self.read(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(PersonaAnalyzer::new(self.analysis.clone()).analyze(
            &layouts,
            task,
            batch::processing_timestamp(),
        ))
    }

    /// Batch options carrying this builder's settings.
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions::new()
            .with_ingest(self.ingest.clone())
            .with_analysis(self.analysis.clone())
    }
}

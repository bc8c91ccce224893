//! Document model types.
//!
//! This module defines the values flowing through the pipeline: the ingested
//! page layout (pages, blocks, lines, spans), the outline produced in outline
//! mode, and the sections and reports produced in persona mode. Everything
//! here is built append-only and never mutated after it reaches its parent.

mod layout;
mod outline;
mod report;
mod section;

pub use layout::{BBox, DocumentLayout, LayoutBlock, LayoutLine, PageLayout, TextSpan};
pub use layout::{BOLD_FLAG, ITALIC_FLAG};
pub use outline::{DocumentOutline, HeadingLevel, OutlineEntry};
pub use report::{AnalysisReport, ExtractedSection, PersonaTask, ReportMetadata};
pub use section::{Section, Subsection};

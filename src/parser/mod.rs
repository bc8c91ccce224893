//! Document ingestion.
//!
//! A [`SpanSource`] yields the raw styled runs of a document page by page;
//! [`ingest`] normalises them into a [`DocumentLayout`](crate::model::DocumentLayout).

mod backend;
mod dump;
mod ingest;
mod layout;
mod options;

use std::path::Path;

pub use backend::{
    decode_font_text, decode_text_simple, decode_with_to_unicode, parse_to_unicode,
    BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue,
};
pub use dump::{DumpSource, RawBlock, RawLine, RawPage, RawSpan, SpanDump};
pub use ingest::{ingest, ingest_path};
pub use layout::{GlyphRun, PdfSource};
pub use options::{ErrorMode, IngestOptions};

use crate::detect::{detect_kind_from_path, SourceKind};
use crate::error::Result;

/// Page-by-page access to the styled runs of one document.
pub trait SpanSource {
    /// Number of pages.
    fn page_count(&self) -> u32;

    /// Read one page (1-based).
    fn read_page(&self, number: u32) -> Result<RawPage>;
}

/// Open the right source for a file based on its leading bytes.
pub fn open_source<P: AsRef<Path>>(path: P) -> Result<Box<dyn SpanSource>> {
    let path = path.as_ref();
    match detect_kind_from_path(path)? {
        SourceKind::Pdf { version } => {
            log::debug!("{}: PDF {}", path.display(), version);
            Ok(Box::new(PdfSource::open(path)?))
        }
        SourceKind::SpanDump => Ok(Box::new(DumpSource::open(path)?)),
    }
}

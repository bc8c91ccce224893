//! JSON span dumps.
//!
//! A span dump is the page → block → line → span tree produced by a layout
//! parser, in the shape PyMuPDF's `get_text("dict")` uses for each page:
//!
//! ```json
//! {"pages": [{"number": 1, "blocks": [{"lines": [{"spans": [
//!     {"text": "Introduction", "size": 18.0, "flags": 16,
//!      "font": "Helvetica-Bold", "bbox": [72, 90, 210, 112]}
//! ]}]}]}]}
//! ```
//!
//! The same types carry the raw output of the PDF reader, so every source
//! goes through one normalisation step.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::SpanSource;
use crate::error::{Error, Result};
use crate::model::{BBox, DocumentLayout};

/// One unnormalised styled run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpan {
    pub text: String,
    pub size: f32,
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub font: String,
    #[serde(default)]
    pub bbox: BBox,
}

/// A line of raw spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLine {
    #[serde(default)]
    pub spans: Vec<RawSpan>,
}

/// A block of raw lines. Image blocks carry no lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    #[serde(default)]
    pub lines: Vec<RawLine>,
}

/// One page of raw blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    /// Informational only; pages are numbered by position when read.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub blocks: Vec<RawBlock>,
}

/// A whole-document span dump. `pages` is required, so other JSON objects
/// (task descriptions, earlier outputs) are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanDump {
    pub pages: Vec<RawPage>,
}

impl SpanDump {
    /// Parse a dump from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let json = json.strip_prefix('\u{feff}').unwrap_or(json);
        Ok(serde_json::from_str(json)?)
    }

    /// Read a dump from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl From<&DocumentLayout> for SpanDump {
    fn from(layout: &DocumentLayout) -> Self {
        let pages = layout
            .pages
            .iter()
            .map(|page| RawPage {
                number: page.number,
                blocks: page
                    .blocks
                    .iter()
                    .map(|block| RawBlock {
                        lines: block
                            .lines
                            .iter()
                            .map(|line| RawLine {
                                spans: line
                                    .spans
                                    .iter()
                                    .map(|s| RawSpan {
                                        text: s.text.clone(),
                                        size: s.font_size,
                                        flags: s.flags,
                                        font: s.font_name.clone(),
                                        bbox: s.bbox,
                                    })
                                    .collect(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        Self { pages }
    }
}

/// [`SpanSource`] over an in-memory span dump.
pub struct DumpSource {
    dump: SpanDump,
}

impl DumpSource {
    /// Wrap a parsed dump.
    pub fn new(dump: SpanDump) -> Self {
        Self { dump }
    }

    /// Read a dump file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(SpanDump::from_path(path)?))
    }
}

impl SpanSource for DumpSource {
    fn page_count(&self) -> u32 {
        self.dump.pages.len() as u32
    }

    fn read_page(&self, number: u32) -> Result<RawPage> {
        let idx = number.checked_sub(1).ok_or(Error::PageOutOfRange(number, self.page_count()))?;
        self.dump
            .pages
            .get(idx as usize)
            .cloned()
            .ok_or(Error::PageOutOfRange(number, self.page_count()))
    }
}

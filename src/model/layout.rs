//! Ingested page layout.

use serde::{Deserialize, Serialize};

/// Font flag bit marking a bold run.
pub const BOLD_FLAG: u32 = 1 << 4;

/// Font flag bit marking an italic run.
pub const ITALIC_FLAG: u32 = 1 << 1;

/// Bounding box in page coordinates, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box from its corners.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box width.
    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).abs()
    }

    /// Box height.
    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).abs()
    }
}

impl From<[f32; 4]> for BBox {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BBox> for [f32; 4] {
    fn from(b: BBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

/// One styled run of text on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// Trimmed text content (never empty)
    pub text: String,
    /// 1-based page number
    pub page: u32,
    /// Font size in points
    pub font_size: f32,
    /// Raw font flag bitmask
    pub flags: u32,
    /// Whether the bold flag bit is set
    pub is_bold: bool,
    /// Font family name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Position on the page
    pub bbox: BBox,
}

impl TextSpan {
    /// Create a new span; boldness is derived from `flags`.
    pub fn new(
        text: impl Into<String>,
        page: u32,
        font_size: f32,
        flags: u32,
        font_name: impl Into<String>,
        bbox: BBox,
    ) -> Self {
        Self {
            text: text.into(),
            page,
            font_size,
            flags,
            is_bold: flags & BOLD_FLAG != 0,
            font_name: font_name.into(),
            bbox,
        }
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A line of spans sharing a baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutLine {
    pub spans: Vec<TextSpan>,
}

/// A block of lines, as grouped by the layout parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutBlock {
    pub lines: Vec<LayoutLine>,
}

impl LayoutBlock {
    /// All spans of the block in reading order.
    pub fn spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.lines.iter().flat_map(|l| l.spans.iter())
    }

    /// Check if the block holds no spans.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.spans.is_empty())
    }
}

/// The blocks of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// 1-based page number
    pub number: u32,
    pub blocks: Vec<LayoutBlock>,
}

impl PageLayout {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            blocks: Vec::new(),
        }
    }

    /// All spans of the page in reading order.
    pub fn spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.blocks.iter().flat_map(|b| b.spans())
    }

    /// Number of spans on the page.
    pub fn span_count(&self) -> usize {
        self.spans().count()
    }
}

/// The full ingested layout of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLayout {
    /// Document name (file name for on-disk sources)
    pub name: String,
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    /// Create an empty layout.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pages: Vec::new(),
        }
    }

    /// Append a page.
    pub fn add_page(&mut self, page: PageLayout) {
        self.pages.push(page);
    }

    /// All spans of the document in reading order.
    pub fn spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.pages.iter().flat_map(|p| p.spans())
    }

    /// Spans eligible for outline analysis (more than one character).
    pub fn outline_spans(&self) -> Vec<&TextSpan> {
        self.spans().filter(|s| s.char_len() > 1).collect()
    }

    /// Total number of spans.
    pub fn span_count(&self) -> usize {
        self.pages.iter().map(|p| p.span_count()).sum()
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if the document has no spans at all.
    pub fn is_empty(&self) -> bool {
        self.spans().next().is_none()
    }
}

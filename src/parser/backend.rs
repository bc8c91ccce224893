//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for PDF operations, isolating
//! the concrete PDF library (lopdf) from the span reader.

use std::collections::{BTreeMap, HashMap};

use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object};

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// US Letter, used when a page has no usable MediaBox.
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// Font information returned by the backend.
#[derive(Debug, Clone)]
pub struct BackendFontInfo {
    /// Font resource name (key in the page's font dictionary).
    pub name: Vec<u8>,
    /// Base font name (e.g., "Helvetica-Bold").
    pub base_font: String,
    /// Declared encoding name, when the font names one.
    pub encoding: Option<String>,
    /// Character code to text, from the font's ToUnicode CMap.
    pub to_unicode: Option<HashMap<u32, String>>,
}

impl BackendFontInfo {
    /// Whether the font shows two-byte Identity-H/V codes.
    pub fn is_identity(&self) -> bool {
        self.encoding
            .as_deref()
            .is_some_and(|enc| enc.contains("Identity"))
    }
}

/// A value from a PDF content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Create an operation.
    pub fn new(operator: &str, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.to_string(),
            operands,
        }
    }

    /// Numeric operand at `idx`.
    pub fn number(&self, idx: usize) -> Option<f32> {
        self.operands.get(idx).and_then(get_number_from_value)
    }
}

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId).
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Return font info for a given page.
    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>>;

    /// Return the raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Parse raw content stream bytes into a sequence of operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Decode a text byte sequence shown with the given font.
    fn decode_text(&self, font: Option<&BackendFontInfo>, bytes: &[u8]) -> String;

    /// Page width and height in points.
    fn page_size(&self, page: PageId) -> (f32, f32);
}

/// Parse a ToUnicode CMap stream into a code to text map.
///
/// Returns `None` when the CMap cannot be parsed or maps nothing.
pub fn parse_to_unicode(data: &[u8]) -> Option<HashMap<u32, String>> {
    let cmap = match std::panic::catch_unwind(|| adobe_cmap_parser::get_unicode_map(data)) {
        Ok(Ok(cmap)) => cmap,
        Ok(Err(e)) => {
            log::warn!("Failed to parse ToUnicode CMap: {:?}", e);
            return None;
        }
        Err(_) => {
            log::warn!("ToUnicode CMap parser panicked");
            return None;
        }
    };

    // Targets are UTF-16BE
    let map: HashMap<u32, String> = cmap
        .into_iter()
        .filter(|(_, bytes)| bytes.len() % 2 == 0)
        .filter_map(|(code, bytes)| {
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();
            String::from_utf16(&units).ok().map(|text| (code, text))
        })
        .collect();

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// Decode shown bytes as `code_width`-byte codes through a ToUnicode map.
///
/// Unmapped one-byte codes fall back to Latin-1; unmapped wider codes become
/// U+FFFD.
pub fn decode_with_to_unicode(
    bytes: &[u8],
    code_width: usize,
    map: &HashMap<u32, String>,
) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.chunks(code_width.max(1)) {
        let code = chunk.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
        match map.get(&code) {
            Some(mapped) => text.push_str(mapped),
            None if chunk.len() == 1 => text.push(chunk[0] as char),
            None => text.push('\u{FFFD}'),
        }
    }
    text
}

/// Decode bytes shown with `font`.
///
/// A ToUnicode CMap wins when present. Identity-H/V codes are glyph ids, so
/// without a CMap they cannot be mapped to text and go through
/// [`decode_text_simple`] like any other unknown encoding.
pub fn decode_font_text(font: Option<&BackendFontInfo>, bytes: &[u8]) -> String {
    match font {
        Some(font) => match &font.to_unicode {
            Some(map) => {
                let width = if font.is_identity() { 2 } else { 1 };
                decode_with_to_unicode(bytes, width, map)
            }
            None => decode_text_simple(bytes),
        },
        None => decode_text_simple(bytes),
    }
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

// ---------------------------------------------------------------------------
// LopdfBackend: concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Self::checked(doc)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Self::checked(doc)
    }

    fn checked(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok(),
            other => Some(other),
        }
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>> {
        let fonts = self
            .doc
            .get_page_fonts(page)
            .map_err(|e| Error::PdfParse(format!("cannot get page fonts: {}", e)))?;

        let mut result = Vec::with_capacity(fonts.len());
        for (name, dict) in &fonts {
            let base_font = dict
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).into_owned())
                .unwrap_or_else(|| "Unknown".to_string());
            let encoding = dict.get(b"Encoding").ok().and_then(|o| match o {
                Object::Name(n) => Some(String::from_utf8_lossy(n).into_owned()),
                _ => None,
            });
            let to_unicode = dict
                .get(b"ToUnicode")
                .ok()
                .and_then(|o| self.resolve(o))
                .and_then(|o| o.as_stream().ok())
                .and_then(|stream| {
                    let data = stream
                        .decompressed_content()
                        .unwrap_or_else(|_| stream.content.clone());
                    parse_to_unicode(&data)
                });
            result.push(BackendFontInfo {
                name: name.clone(),
                base_font,
                encoding,
                to_unicode,
            });
        }
        Ok(result)
    }

    fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
        self.doc
            .get_page_content(page)
            .map_err(|e| Error::PdfParse(format!("cannot get page content: {}", e)))
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content = Content::decode(data)
            .map_err(|e| Error::PdfParse(format!("content stream decode error: {}", e)))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn decode_text(&self, font: Option<&BackendFontInfo>, bytes: &[u8]) -> String {
        decode_font_text(font, bytes)
    }

    fn page_size(&self, page: PageId) -> (f32, f32) {
        let media_box = self
            .doc
            .get_dictionary(page)
            .ok()
            .and_then(|d| d.get(b"MediaBox").ok())
            .and_then(|o| o.as_array().ok());

        match media_box {
            Some(arr) if arr.len() >= 4 => {
                let nums: Vec<f32> = arr
                    .iter()
                    .map(|o| get_number_from_value(&convert_object(o)).unwrap_or(0.0))
                    .collect();
                let (w, h) = ((nums[2] - nums[0]).abs(), (nums[3] - nums[1]).abs());
                if w > 0.0 && h > 0.0 {
                    (w, h)
                } else {
                    DEFAULT_PAGE_SIZE
                }
            }
            _ => DEFAULT_PAGE_SIZE,
        }
    }
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}

/// Helper: extract a number from a [`PdfValue`].
pub fn get_number_from_value(val: &PdfValue) -> Option<f32> {
    match val {
        PdfValue::Integer(i) => Some(*i as f32),
        PdfValue::Real(r) => Some(*r),
        _ => None,
    }
}

//! Span reading for PDF documents.
//!
//! Walks page content streams to recover positioned, styled text runs, then
//! groups them into lines (shared baseline) and blocks (paragraph-like runs
//! of lines) the way a layout parser would.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::backend::{
    get_number_from_value, BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue,
};
use super::dump::{RawBlock, RawLine, RawPage, RawSpan};
use super::SpanSource;
use crate::error::{Error, Result};
use crate::model::{BBox, BOLD_FLAG, ITALIC_FLAG};

/// A positioned text run recovered from a content stream.
#[derive(Debug, Clone)]
pub struct GlyphRun {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline, bottom-up user space)
    pub y: f32,
    /// Estimated advance width
    pub width: f32,
    /// Effective font size in points
    pub font_size: f32,
    /// Base font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Font flags derived from the font name
    pub flags: u32,
}

impl GlyphRun {
    /// Create a run; style flags are inferred from the font name.
    pub fn new(text: String, x: f32, y: f32, font_size: f32, font_name: String) -> Self {
        let lower = font_name.to_lowercase();
        let mut flags = 0;
        if lower.contains("bold") || lower.contains("black") || lower.contains("heavy") {
            flags |= BOLD_FLAG;
        }
        if lower.contains("italic") || lower.contains("oblique") {
            flags |= ITALIC_FLAG;
        }
        // Half an em per character
        let width = text.chars().count() as f32 * font_size * 0.5;

        Self {
            text,
            x,
            y,
            width,
            font_size,
            font_name,
            flags,
        }
    }

    /// Whether the run uses a bold face.
    pub fn is_bold(&self) -> bool {
        self.flags & BOLD_FLAG != 0
    }
}

/// Runs sharing a baseline.
#[derive(Debug, Clone)]
struct LineGroup {
    runs: Vec<GlyphRun>,
    y: f32,
    x: f32,
    font_size: f32,
}

impl LineGroup {
    fn from_runs(mut runs: Vec<GlyphRun>) -> Self {
        runs.sort_by(|a, b| a.x.total_cmp(&b.x));

        // Dominant size, weighted by text length
        let total_chars: usize = runs.iter().map(|r| r.text.len()).sum();
        let weighted: f32 = runs
            .iter()
            .map(|r| r.font_size * r.text.len() as f32)
            .sum();
        let font_size = match (total_chars, runs.first()) {
            (0, Some(first)) => first.font_size,
            (n, _) if n > 0 => weighted / n as f32,
            _ => 0.0,
        };
        let (x, y) = runs.first().map(|r| (r.x, r.y)).unwrap_or((0.0, 0.0));

        Self {
            runs,
            y,
            x,
            font_size,
        }
    }

    fn is_bold(&self) -> bool {
        let bold: usize = self
            .runs
            .iter()
            .filter(|r| r.is_bold())
            .map(|r| r.text.len())
            .sum();
        let total: usize = self.runs.iter().map(|r| r.text.len()).sum();
        total > 0 && bold as f32 / total as f32 > 0.5
    }
}

/// [`SpanSource`] reading a PDF through a [`PdfBackend`].
pub struct PdfSource<B: PdfBackend = LopdfBackend> {
    backend: B,
    pages: BTreeMap<u32, PageId>,
}

impl PdfSource<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(LopdfBackend::load_file(path)?))
    }

    /// Read a PDF from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self::new(LopdfBackend::load_bytes(data)?))
    }
}

impl<B: PdfBackend> PdfSource<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        let pages = backend.pages();
        Self { backend, pages }
    }

    /// Recover the positioned text runs of a page, in content-stream order.
    pub fn page_runs(&self, page_id: PageId) -> Result<Vec<GlyphRun>> {
        let fonts: HashMap<Vec<u8>, BackendFontInfo> = self
            .backend
            .page_fonts(page_id)?
            .into_iter()
            .map(|f| (f.name.clone(), f))
            .collect();
        let content = self.backend.page_content(page_id)?;
        let ops = self.backend.decode_content(&content)?;
        Ok(self.walk_content(&ops, &fonts))
    }

    fn walk_content(
        &self,
        ops: &[ContentOp],
        fonts: &HashMap<Vec<u8>, BackendFontInfo>,
    ) -> Vec<GlyphRun> {
        let mut runs = Vec::new();
        let mut font: Option<&BackendFontInfo> = None;
        let mut font_label = String::new();
        let mut font_size: f32 = 12.0;
        let mut tm = TextMatrix::default();
        let mut in_text_block = false;

        for op in ops {
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    tm.begin();
                }
                "ET" => in_text_block = false,
                "Tf" => {
                    if let Some(PdfValue::Name(name)) = op.operands.first() {
                        font = fonts.get(name);
                        font_label = font
                            .map(|f| f.base_font.clone())
                            .unwrap_or_else(|| String::from_utf8_lossy(name).into_owned());
                    }
                    font_size = op.number(1).unwrap_or(12.0);
                }
                "TL" => {
                    if let Some(leading) = op.number(0) {
                        tm.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                        if op.operator == "TD" {
                            tm.leading = -ty;
                        }
                        tm.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        tm.set(
                            op.number(0).unwrap_or(1.0),
                            op.number(1).unwrap_or(0.0),
                            op.number(2).unwrap_or(0.0),
                            op.number(3).unwrap_or(1.0),
                            op.number(4).unwrap_or(0.0),
                            op.number(5).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => tm.next_line(),
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        tm.next_line();
                    }
                    if !in_text_block {
                        continue;
                    }

                    let text = match op.operator.as_str() {
                        "TJ" => self.decode_array(font, op.operands.first()),
                        "\"" => self.decode_operand(font, op.operands.get(2)),
                        _ => self.decode_operand(font, op.operands.first()),
                    };

                    if !text.trim().is_empty() {
                        let (x, y) = tm.position();
                        let run = GlyphRun::new(
                            text,
                            x,
                            y,
                            font_size * tm.scale(),
                            font_label.clone(),
                        );
                        tm.advance(run.width / tm.scale().max(f32::EPSILON));
                        runs.push(run);
                    }
                }
                _ => {}
            }
        }

        runs
    }

    fn decode_operand(&self, font: Option<&BackendFontInfo>, operand: Option<&PdfValue>) -> String {
        match operand {
            Some(PdfValue::Str(bytes)) => self.backend.decode_text(font, bytes),
            _ => String::new(),
        }
    }

    /// Decode a TJ array; large negative adjustments become word spaces.
    fn decode_array(&self, font: Option<&BackendFontInfo>, operand: Option<&PdfValue>) -> String {
        // 1/1000 text space units; ~0.2 em
        const SPACE_THRESHOLD: f32 = 200.0;

        let Some(PdfValue::Array(items)) = operand else {
            return String::new();
        };

        let mut combined = String::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => combined.push_str(&self.backend.decode_text(font, bytes)),
                PdfValue::Integer(_) | PdfValue::Real(_) => {
                    let adjustment = -get_number_from_value(item).unwrap_or(0.0);
                    let needs_space = adjustment > SPACE_THRESHOLD
                        && combined
                            .chars()
                            .last()
                            .map(|c| !c.is_whitespace() && !is_spaceless_script_char(c))
                            .unwrap_or(false);
                    if needs_space {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }
        combined
    }

    /// Group runs into lines by baseline, top to bottom.
    fn group_lines(&self, mut runs: Vec<GlyphRun>) -> Vec<LineGroup> {
        // PDF Y grows upwards
        runs.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

        let mut lines = Vec::new();
        let mut current: Vec<GlyphRun> = Vec::new();
        let mut current_y: Option<f32> = None;

        for run in runs {
            let tolerance = run.font_size * 0.3;
            match current_y {
                Some(y) if (run.y - y).abs() <= tolerance => current.push(run),
                _ => {
                    if !current.is_empty() {
                        lines.push(LineGroup::from_runs(std::mem::take(&mut current)));
                    }
                    current_y = Some(run.y);
                    current.push(run);
                }
            }
        }
        if !current.is_empty() {
            lines.push(LineGroup::from_runs(current));
        }

        lines
    }

    /// Group lines into blocks based on spacing and style changes.
    fn group_blocks(&self, lines: Vec<LineGroup>) -> Vec<Vec<LineGroup>> {
        let avg_spacing = avg_line_spacing(&lines);
        let mut blocks: Vec<Vec<LineGroup>> = Vec::new();
        let mut current: Vec<LineGroup> = Vec::new();

        for line in lines {
            let should_break = current
                .last()
                .map(|prev| should_break_block(prev, &line, avg_spacing))
                .unwrap_or(false);
            if should_break {
                blocks.push(std::mem::take(&mut current));
            }
            current.push(line);
        }
        if !current.is_empty() {
            blocks.push(current);
        }

        blocks
    }
}

impl<B: PdfBackend> SpanSource for PdfSource<B> {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn read_page(&self, number: u32) -> Result<RawPage> {
        let page_id = *self
            .pages
            .get(&number)
            .ok_or(Error::PageOutOfRange(number, self.page_count()))?;
        let (_, height) = self.backend.page_size(page_id);

        let runs = self.page_runs(page_id)?;
        log::debug!("page {}: {} runs", number, runs.len());
        let lines = self.group_lines(runs);
        let blocks = self.group_blocks(lines);

        Ok(RawPage {
            number,
            blocks: blocks
                .into_iter()
                .map(|lines| RawBlock {
                    lines: lines
                        .into_iter()
                        .map(|line| RawLine {
                            spans: line
                                .runs
                                .into_iter()
                                .map(|run| to_raw_span(run, height))
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        })
    }
}

/// Convert a run to a top-left-origin raw span.
fn to_raw_span(run: GlyphRun, page_height: f32) -> RawSpan {
    let top = run.y + run.font_size * 0.8; // ascender
    let bottom = run.y - run.font_size * 0.2; // descender
    RawSpan {
        bbox: BBox::new(run.x, page_height - top, run.x + run.width, page_height - bottom),
        size: run.font_size,
        flags: run.flags,
        font: run.font_name,
        text: run.text,
    }
}

fn avg_line_spacing(lines: &[LineGroup]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn should_break_block(prev: &LineGroup, curr: &LineGroup, avg_spacing: f32) -> bool {
    // Large spacing indicates new paragraph
    if (prev.y - curr.y).abs() > avg_spacing * 1.5 {
        return true;
    }
    if (prev.font_size - curr.font_size).abs() > 1.0 {
        return true;
    }
    // Indentation change
    if (prev.x - curr.x).abs() > 20.0 {
        return true;
    }
    // A bold line between regular ones is usually a heading
    prev.is_bold() != curr.is_bold()
}

/// Text matrix for tracking position in content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    // Line start, restored by T* and Td
    line_e: f32,
    line_f: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            line_e: 0.0,
            line_f: 0.0,
            leading: 12.0,
        }
    }
}

impl TextMatrix {
    /// Reset the matrices at BT; leading is text state and survives.
    fn begin(&mut self) {
        *self = Self {
            leading: self.leading,
            ..Self::default()
        };
    }

    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
        self.line_e = e;
        self.line_f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.line_e += tx * self.a + ty * self.c;
        self.line_f += tx * self.b + ty * self.d;
        self.e = self.line_e;
        self.f = self.line_f;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    /// Move along the baseline after showing text.
    fn advance(&mut self, dx: f32) {
        self.e += dx * self.a;
        self.f += dx * self.b;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        // Extensions B-F
        || (0x20000..=0x2EBEF).contains(&code)
        // Hiragana, Katakana
        || (0x3040..=0x30FF).contains(&code)
        // CJK Symbols and Punctuation
        || (0x3000..=0x303F).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend serving a fixed operation list for a single page.
    struct FixedBackend {
        ops: Vec<ContentOp>,
    }

    impl PdfBackend for FixedBackend {
        fn pages(&self) -> BTreeMap<u32, PageId> {
            BTreeMap::from([(1, (3, 0))])
        }

        fn page_fonts(&self, _page: PageId) -> Result<Vec<BackendFontInfo>> {
            Ok(vec![
                BackendFontInfo {
                    name: b"F1".to_vec(),
                    base_font: "Helvetica".to_string(),
                    encoding: None,
                    to_unicode: None,
                },
                BackendFontInfo {
                    name: b"F2".to_vec(),
                    base_font: "Helvetica-Bold".to_string(),
                    encoding: None,
                    to_unicode: None,
                },
            ])
        }

        fn page_content(&self, _page: PageId) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }

        fn decode_content(&self, _data: &[u8]) -> Result<Vec<ContentOp>> {
            Ok(self.ops.clone())
        }

        fn decode_text(&self, _font: Option<&BackendFontInfo>, bytes: &[u8]) -> String {
            crate::parser::backend::decode_text_simple(bytes)
        }

        fn page_size(&self, _page: PageId) -> (f32, f32) {
            (612.0, 792.0)
        }
    }

    fn name(n: &str) -> PdfValue {
        PdfValue::Name(n.as_bytes().to_vec())
    }

    fn s(text: &str) -> PdfValue {
        PdfValue::Str(text.as_bytes().to_vec())
    }

    fn num(v: f32) -> PdfValue {
        PdfValue::Real(v)
    }

    fn sample_ops() -> Vec<ContentOp> {
        vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F2"), num(18.0)]),
            ContentOp::new("Td", vec![num(72.0), num(700.0)]),
            ContentOp::new("Tj", vec![s("Introduction")]),
            ContentOp::new("Tf", vec![name("F1"), num(10.0)]),
            ContentOp::new("TL", vec![num(12.0)]),
            ContentOp::new("Td", vec![num(0.0), num(-30.0)]),
            ContentOp::new("Tj", vec![s("First body line")]),
            ContentOp::new("T*", vec![]),
            ContentOp::new(
                "TJ",
                vec![PdfValue::Array(vec![s("Second"), PdfValue::Integer(-300), s("line")])],
            ),
            ContentOp::new("ET", vec![]),
        ]
    }

    #[test]
    fn test_glyph_run_flags() {
        let run = GlyphRun::new("A".into(), 0.0, 0.0, 12.0, "Times-BoldItalic".into());
        assert!(run.is_bold());
        assert_ne!(run.flags & ITALIC_FLAG, 0);
        let plain = GlyphRun::new("A".into(), 0.0, 0.0, 12.0, "Helvetica".into());
        assert_eq!(plain.flags, 0);
    }

    #[test]
    fn test_walk_content_positions() {
        let source = PdfSource::new(FixedBackend { ops: sample_ops() });
        let runs = source.page_runs((3, 0)).unwrap();

        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].text, "Introduction");
        assert_eq!(runs[0].font_size, 18.0);
        assert!(runs[0].is_bold());
        assert_eq!(runs[1].y, 670.0);
        assert_eq!(runs[2].y, 658.0);
        assert_eq!(runs[2].text, "Second line");
    }

    #[test]
    fn test_read_page_groups_blocks() {
        let source = PdfSource::new(FixedBackend { ops: sample_ops() });
        let page = source.read_page(1).unwrap();

        // Heading block, then one body block of two lines
        assert_eq!(page.blocks.len(), 2);
        assert_eq!(page.blocks[0].lines[0].spans[0].text, "Introduction");
        assert_eq!(page.blocks[0].lines[0].spans[0].flags & BOLD_FLAG, BOLD_FLAG);
        assert_eq!(page.blocks[1].lines.len(), 2);

        let bbox = page.blocks[0].lines[0].spans[0].bbox;
        assert!(bbox.y0 < bbox.y1);
        assert!((bbox.y0 - (792.0 - 700.0 - 18.0 * 0.8)).abs() < 1e-3);
    }

    #[test]
    fn test_read_page_out_of_range() {
        let source = PdfSource::new(FixedBackend { ops: vec![] });
        assert_eq!(source.page_count(), 1);
        assert!(matches!(source.read_page(2), Err(Error::PageOutOfRange(2, 1))));
    }

    #[test]
    fn test_non_finite_positions_still_sort() {
        let ops = vec![
            ContentOp::new("BT", vec![]),
            ContentOp::new("Tf", vec![name("F1"), num(10.0)]),
            ContentOp::new("Td", vec![num(f32::NAN), num(700.0)]),
            ContentOp::new("Tj", vec![s("lost")]),
            ContentOp::new("ET", vec![]),
            ContentOp::new("BT", vec![]),
            ContentOp::new("Td", vec![num(72.0), num(f32::NAN)]),
            ContentOp::new("Tj", vec![s("adrift")]),
            ContentOp::new("Tj", vec![s("along")]),
            ContentOp::new("ET", vec![]),
            ContentOp::new("BT", vec![]),
            ContentOp::new("Td", vec![num(72.0), num(650.0)]),
            ContentOp::new("Tj", vec![s("anchored")]),
            ContentOp::new("ET", vec![]),
        ];
        let source = PdfSource::new(FixedBackend { ops });
        let page = source.read_page(1).unwrap();

        let spans: usize = page
            .blocks
            .iter()
            .flat_map(|b| &b.lines)
            .map(|l| l.spans.len())
            .sum();
        assert_eq!(spans, 4);
    }

    #[test]
    fn test_text_outside_bt_is_ignored() {
        let ops = vec![ContentOp::new("Tj", vec![s("stray")])];
        let source = PdfSource::new(FixedBackend { ops });
        assert!(source.page_runs((3, 0)).unwrap().is_empty());
    }
}

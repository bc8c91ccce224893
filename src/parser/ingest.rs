//! Span ingestion adapter.

use std::path::Path;
use std::time::Instant;

use unicode_normalization::UnicodeNormalization;

use super::dump::RawPage;
use super::options::{ErrorMode, IngestOptions};
use super::{open_source, SpanSource};
use crate::error::Result;
use crate::model::{DocumentLayout, LayoutBlock, LayoutLine, PageLayout, TextSpan};

/// Read every page of `source` into a normalised layout.
///
/// Span text is NFC-normalised and trimmed; blank spans, spans without a
/// positive font size, and lines or blocks left empty are dropped. Pages
/// are numbered by position. Page failures are fatal in
/// [`ErrorMode::Strict`] and skipped in [`ErrorMode::Lenient`].
pub fn ingest(
    source: &dyn SpanSource,
    name: &str,
    options: &IngestOptions,
) -> Result<DocumentLayout> {
    let started = Instant::now();
    let total = source.page_count();
    let mut layout = DocumentLayout::new(name);

    for number in 1..=total {
        if let Some(budget) = options.time_budget {
            if started.elapsed() >= budget {
                log::warn!(
                    "{}: time budget of {:?} spent, skipping pages {}-{}",
                    name,
                    budget,
                    number,
                    total
                );
                break;
            }
        }

        match source.read_page(number) {
            Ok(raw) => layout.add_page(normalize_page(name, number, raw, options)),
            Err(e) if options.error_mode == ErrorMode::Lenient => {
                log::warn!("{}: failed to read page {}: {}", name, number, e);
            }
            Err(e) => return Err(e),
        }
    }

    log::debug!(
        "{}: ingested {} spans from {} pages",
        name,
        layout.span_count(),
        layout.page_count()
    );
    Ok(layout)
}

/// Open `path` and ingest it; the layout is named after the file name.
pub fn ingest_path<P: AsRef<Path>>(path: P, options: &IngestOptions) -> Result<DocumentLayout> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let source = open_source(path)?;
    ingest(source.as_ref(), &name, options)
}

fn normalize_page(name: &str, number: u32, raw: RawPage, options: &IngestOptions) -> PageLayout {
    let mut page = PageLayout::new(number);
    let mut kept = 0usize;
    let mut dropped = 0usize;
    let cap = options.max_spans_per_page;

    for raw_block in raw.blocks {
        let mut block = LayoutBlock::default();
        for raw_line in raw_block.lines {
            let mut line = LayoutLine::default();
            for raw_span in raw_line.spans {
                let text: String = raw_span.text.nfc().collect();
                let text = text.trim();
                if text.is_empty() || !(raw_span.size.is_finite() && raw_span.size > 0.0) {
                    continue;
                }
                if cap > 0 && kept >= cap {
                    dropped += 1;
                    continue;
                }
                kept += 1;
                line.spans.push(TextSpan::new(
                    text,
                    number,
                    raw_span.size,
                    raw_span.flags,
                    raw_span.font,
                    raw_span.bbox,
                ));
            }
            if !line.spans.is_empty() {
                block.lines.push(line);
            }
        }
        if !block.is_empty() {
            page.blocks.push(block);
        }
    }

    if dropped > 0 {
        log::warn!(
            "{}: page {} exceeds {} spans, dropped {}",
            name,
            number,
            cap,
            dropped
        );
    }
    page
}

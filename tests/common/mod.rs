//! Shared fixtures: span-dump documents built in memory or on disk.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use docsift::model::{BBox, DocumentLayout, LayoutBlock, LayoutLine, PageLayout, TextSpan};
use serde_json::{json, Value};

/// One span: (text, size, flags).
pub type SpanSpec<'a> = (&'a str, f32, u32);

/// Build a layout where every inner slice is one block and every span sits
/// on its own line.
pub fn layout(name: &str, pages: &[&[&[SpanSpec]]]) -> DocumentLayout {
    let mut doc = DocumentLayout::new(name);
    for (i, blocks) in pages.iter().enumerate() {
        let number = i as u32 + 1;
        let mut page = PageLayout::new(number);
        for block in blocks.iter() {
            page.blocks.push(LayoutBlock {
                lines: block
                    .iter()
                    .map(|(text, size, flags)| LayoutLine {
                        spans: vec![TextSpan::new(
                            *text,
                            number,
                            *size,
                            *flags,
                            "Helvetica",
                            BBox::default(),
                        )],
                    })
                    .collect(),
            });
        }
        doc.add_page(page);
    }
    doc
}

/// Span-dump JSON with the same shape as [`layout`].
pub fn dump_json(pages: &[&[&[SpanSpec]]]) -> Value {
    let pages: Vec<Value> = pages
        .iter()
        .enumerate()
        .map(|(i, blocks)| {
            let blocks: Vec<Value> = blocks
                .iter()
                .map(|block| {
                    let lines: Vec<Value> = block
                        .iter()
                        .map(|(text, size, flags)| {
                            json!({"spans": [{
                                "text": text,
                                "size": size,
                                "flags": flags,
                                "font": "Helvetica",
                                "bbox": [72.0, 72.0, 300.0, 90.0]
                            }]})
                        })
                        .collect();
                    json!({ "lines": lines })
                })
                .collect();
            json!({"number": i + 1, "blocks": blocks})
        })
        .collect();
    json!({ "pages": pages })
}

/// Write a span dump into `dir` and return its path.
pub fn write_dump(dir: &Path, file_name: &str, pages: &[&[&[SpanSpec]]]) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, dump_json(pages).to_string()).unwrap();
    path
}

pub const BODY: &str = "the committee met twice during the quarter, as planned.";

//! Outline mode: title resolution and heading hierarchy.

mod common;

use common::{layout, BODY};
use docsift::analysis::{
    extract_outline, AnalysisOptions, HeadingThresholds, OutlineBuilder,
};
use docsift::model::{DocumentOutline, HeadingLevel, BOLD_FLAG};

#[test]
fn test_introduction_scenario() {
    let body: Vec<(&str, f32, u32)> = (0..20)
        .map(|_| ("the quick brown fox jumps over the lazy dog", 10.0, 0))
        .collect();
    let doc = layout(
        "intro.pdf",
        &[&[&[("INTRODUCTION", 28.0, BOLD_FLAG)], body.as_slice()]],
    );

    let outline = extract_outline(&doc);
    assert_eq!(outline.title, "INTRODUCTION");
    assert_eq!(outline.outline.len(), 1);
    assert_eq!(outline.outline[0].level, HeadingLevel::H1);
    assert_eq!(outline.outline[0].text, "INTRODUCTION");
    assert_eq!(outline.outline[0].page, 1);
}

#[test]
fn test_outline_texts_unique_in_first_occurrence_order() {
    let doc = layout(
        "report.pdf",
        &[
            &[
                &[("Summary", 18.0, 0), (BODY, 11.0, 0)],
                &[("Findings", 14.0, 0), (BODY, 11.0, 0)],
            ],
            &[
                &[("Summary", 18.0, 0), (BODY, 11.0, 0)],
                &[("Appendix", 14.0, 0), (BODY, 11.0, 0), ("Findings", 14.0, 0)],
            ],
        ],
    );

    let outline = extract_outline(&doc);
    let texts: Vec<_> = outline.outline.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["Summary", "Findings", "Appendix"]);

    let mut sorted = texts.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), texts.len());
}

#[test]
fn test_levels_monotonic_in_font_size() {
    let sizes = [30.0, 12.0, 24.0, 16.0, 20.0, 14.0];
    let names = ["Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot"];
    let mut block: Vec<(&str, f32, u32)> = Vec::new();
    for (name, size) in names.iter().zip(sizes) {
        block.push((*name, size, BOLD_FLAG));
        block.push((BODY, 11.0, 0));
    }
    let doc = layout("levels.pdf", &[&[block.as_slice()]]);

    let outline = extract_outline(&doc);
    assert_eq!(outline.outline.len(), 6);

    let size_of = |text: &str| sizes[names.iter().position(|n| *n == text).unwrap()];
    for a in &outline.outline {
        for b in &outline.outline {
            if size_of(&a.text) > size_of(&b.text) {
                assert!(a.level <= b.level, "{} vs {}", a.text, b.text);
            }
        }
    }
    assert_eq!(outline.outline[0].level, HeadingLevel::H1);
    assert_eq!(outline.outline[2].level, HeadingLevel::H2);
    assert_eq!(outline.outline[1].level, HeadingLevel::H3);
}

#[test]
fn test_title_is_deterministic() {
    let doc = layout(
        "ties.pdf",
        &[
            &[&[("Quarterly Review", 20.0, 0), (BODY, 11.0, 0)]],
            &[&[("Quarterly Outlook", 20.0, 0), (BODY, 11.0, 0)]],
        ],
    );

    let first = extract_outline(&doc);
    for _ in 0..5 {
        assert_eq!(extract_outline(&doc), first);
    }
    assert_eq!(first.title, "Quarterly Review");
}

#[test]
fn test_title_prefix_stripped_and_late_pages_ignored() {
    let doc = layout(
        "numbered.pdf",
        &[
            &[&[("1. Project Charter", 18.0, 0), (BODY, 11.0, 0)]],
            &[&[(BODY, 11.0, 0)]],
            &[&[("Giant Poster Text", 40.0, 0)]],
        ],
    );
    assert_eq!(extract_outline(&doc).title, "Project Charter");
}

#[test]
fn test_custom_thresholds() {
    let doc = layout(
        "small.pdf",
        &[&[&[("Fine Print", 8.0, BOLD_FLAG), (BODY, 7.0, 0)]]],
    );
    assert!(extract_outline(&doc).outline.is_empty());

    let options = AnalysisOptions::new().with_headings(HeadingThresholds {
        min_font_size: 6.0,
        ..Default::default()
    });
    let outline = OutlineBuilder::new(&options).build(&doc);
    assert_eq!(outline.outline.len(), 1);
    assert_eq!(outline.outline[0].text, "Fine Print");
}

#[test]
fn test_empty_document_sentinel() {
    let doc = layout("blank.pdf", &[&[], &[]]);
    assert_eq!(extract_outline(&doc), DocumentOutline::empty_document());
}

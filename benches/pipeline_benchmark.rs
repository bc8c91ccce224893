//! Benchmarks for outline extraction and persona ranking.
//!
//! Run with: cargo bench
//!
//! Layouts are synthetic: each page holds a few headed sections of body text.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use docsift::analysis::{extract_outline, AnalysisOptions, PersonaAnalyzer};
use docsift::model::{
    BBox, DocumentLayout, LayoutBlock, LayoutLine, PageLayout, PersonaTask, TextSpan, BOLD_FLAG,
};

const BODY: &[&str] = &[
    "seasonal vegetables are roasted with olive oil, garlic and fresh herbs.",
    "the kitchen prepares stock every morning before service begins.",
    "guests with allergies are offered a separate gluten-free menu.",
    "desserts rotate weekly and favour fruit from local orchards.",
];

fn block(spans: Vec<TextSpan>) -> LayoutBlock {
    LayoutBlock {
        lines: spans
            .into_iter()
            .map(|span| LayoutLine { spans: vec![span] })
            .collect(),
    }
}

/// Creates a synthetic layout with `sections_per_page` headed sections per page.
fn create_layout(name: &str, page_count: u32, sections_per_page: usize) -> DocumentLayout {
    let mut doc = DocumentLayout::new(name);
    for number in 1..=page_count {
        let mut page = PageLayout::new(number);
        for s in 0..sections_per_page {
            let size = if s == 0 { 18.0 } else { 14.0 };
            let heading = format!("Section {}.{}", number, s + 1);
            page.blocks.push(block(vec![TextSpan::new(
                heading,
                number,
                size,
                BOLD_FLAG,
                "Helvetica-Bold",
                BBox::default(),
            )]));
            page.blocks.push(block(
                BODY.iter()
                    .map(|t| TextSpan::new(*t, number, 11.0, 0, "Helvetica", BBox::default()))
                    .collect(),
            ));
        }
        doc.add_page(page);
    }
    doc
}

/// Benchmark outline extraction at various sizes.
fn bench_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline");

    for page_count in [1, 10, 50].iter() {
        let layout = create_layout("bench.pdf", *page_count, 4);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| extract_outline(black_box(&layout)));
        });
    }

    group.finish();
}

/// Benchmark persona ranking, parallel and sequential.
fn bench_persona(c: &mut Criterion) {
    let layouts: Vec<DocumentLayout> = (0..8)
        .map(|i| create_layout(&format!("doc{}.pdf", i), 10, 4))
        .collect();
    let task = PersonaTask::new("Food Contractor", "Prepare a vegetarian buffet menu");

    let mut group = c.benchmark_group("persona");

    let parallel = PersonaAnalyzer::new(AnalysisOptions::new());
    group.bench_function("parallel", |b| {
        b.iter(|| parallel.analyze(black_box(&layouts), &task, "bench"));
    });

    let sequential = PersonaAnalyzer::new(AnalysisOptions::new().sequential());
    group.bench_function("sequential", |b| {
        b.iter(|| sequential.analyze(black_box(&layouts), &task, "bench"));
    });

    group.finish();
}

criterion_group!(benches, bench_outline, bench_persona);
criterion_main!(benches);

//! Benchmarks for outline extraction.
//!
//! Run with: cargo bench
//!
//! Pages are synthetic so the numbers measure statistics, classification
//! and title selection without PDF parsing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdf_outline::outline::{identify_title, PageSpans};
use pdf_outline::{
    detect::sniff_bytes, extract_outline_from_pages, FontStatistics, HeadingClassifier, PageText,
    TextSpan,
};

/// A page with one heading every ten body spans.
fn create_test_page(number: u32, span_count: usize) -> PageText {
    let spans = (0..span_count)
        .map(|i| match i % 10 {
            0 => TextSpan::bold(format!("{}.{} Section heading", number, i / 10), 16.0),
            5 if i % 20 == 5 => TextSpan::plain("Conclusion", 11.0),
            _ => TextSpan::plain(
                "Body text that is long enough to be ordinary prose in a paragraph.",
                11.0,
            ),
        })
        .collect();
    PageText::from_spans(number, spans)
}

fn create_test_document(page_count: u32) -> Vec<PageText> {
    (1..=page_count).map(|n| create_test_page(n, 60)).collect()
}

/// Benchmark PDF header sniffing.
fn bench_header_detection(c: &mut Criterion) {
    let mut pdf_data = b"%PDF-1.7\n".to_vec();
    pdf_data.extend(std::iter::repeat(b' ').take(1024));
    let non_pdf_data = b"Not a PDF file at all, just random text content";

    c.bench_function("sniff_valid_pdf", |b| {
        b.iter(|| sniff_bytes(black_box(&pdf_data)).unwrap());
    });

    c.bench_function("sniff_non_pdf", |b| {
        b.iter(|| sniff_bytes(black_box(non_pdf_data)).is_err());
    });
}

/// Benchmark span classification against fixed statistics.
fn bench_classification(c: &mut Criterion) {
    let pages: Vec<PageSpans> = create_test_document(10)
        .into_iter()
        .map(PageSpans::from_page)
        .collect();
    let stats = FontStatistics::from_pages(&pages).unwrap();
    let classifier = HeadingClassifier::default();

    c.bench_function("classify_10_pages", |b| {
        b.iter(|| classifier.classify_document(black_box(&pages), &stats));
    });

    c.bench_function("font_statistics_10_pages", |b| {
        b.iter(|| FontStatistics::from_pages(black_box(&pages)).unwrap());
    });
}

/// Benchmark title selection on a single page.
fn bench_title(c: &mut Criterion) {
    let page = PageSpans::from_page(create_test_page(1, 200));

    c.bench_function("identify_title", |b| {
        b.iter(|| identify_title(black_box(&page.spans)));
    });
}

/// Benchmark the whole pipeline at various sizes.
fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_outline");

    for page_count in [1, 10, 50].iter() {
        let pages = create_test_document(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| extract_outline_from_pages(black_box(pages.clone())).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_header_detection,
    bench_classification,
    bench_title,
    bench_extraction,
);
criterion_main!(benches);

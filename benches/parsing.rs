//! Benchmarks for markdown parsing.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use markpane::document;
use markpane::highlight::Palette;

fn bench_parse_simple(c: &mut Criterion) {
    let md = "# Hello\n\nWorld";
    c.bench_function("parse_simple", |b| {
        b.iter(|| document::parse(black_box(md)).unwrap())
    });
}

fn bench_parse_welcome(c: &mut Criterion) {
    // The built-in welcome document covers headings, code, tables and lists.
    let md = markpane::sample::WELCOME;
    c.bench_function("parse_welcome", |b| {
        b.iter(|| document::parse(black_box(md)).unwrap())
    });
}

fn bench_reparse_per_keystroke(c: &mut Criterion) {
    // The preview reparses the full source on every edit; this is the
    // hot path for typing latency.
    let mut md = String::new();
    for i in 1..=200 {
        md.push_str(&format!("Paragraph {i} with some **inline** markup.\n\n"));
    }
    c.bench_function("reparse_per_keystroke", |b| {
        b.iter(|| document::parse_with_layout(black_box(&md), 100, Palette::Dark).unwrap())
    });
}

criterion_group!(
    benches,
    bench_parse_simple,
    bench_parse_welcome,
    bench_reparse_per_keystroke
);
criterion_main!(benches);

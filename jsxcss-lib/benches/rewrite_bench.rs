extern crate criterion;

use criterion::{criterion_group, criterion_main, Criterion};

use jsxcss_lib::config::CorrectionConfig;
use jsxcss_lib::parser::scanner::StylePattern;
use jsxcss_lib::rewrite::Rewriter;
use jsxcss_lib::style::index::EquivalenceIndex;

fn bench_many_occurrences(c: &mut Criterion) {
    let mut big_jsx = String::with_capacity(10_000_000);
    big_jsx.push_str("<div>");
    for i in 0..100_000 {
        // 500 distinct declarations, each repeated 200 times.
        big_jsx.push_str(&format!(
            "<p style={{{{ width: {}, color: '#2C2C2C', boxShadow: '0px 6px 6px rgba(0, 0, 0, 0.25)' }}}}>Test</p>",
            i % 500
        ));
    }
    big_jsx.push_str("</div>");

    let corrections = CorrectionConfig::default();
    let rewriter = Rewriter::new(StylePattern::default(), &corrections);
    c.bench_function("many_occurrences", |b| {
        b.iter(|| {
            let mut index = EquivalenceIndex::new();
            rewriter.rewrite(&big_jsx, &mut index)
        })
    });
}

fn bench_deep_nesting(c: &mut Criterion) {
    let mut deep_jsx = String::new();
    for depth in 0..1000 {
        deep_jsx.push_str(&format!(
            "<div style={{{{ position: 'absolute', left: {}, top: {}, display: 'inline-flex' }}}}>",
            depth, depth
        ));
    }
    deep_jsx.push_str("Content");
    for _ in 0..1000 {
        deep_jsx.push_str("</div>");
    }

    let corrections = CorrectionConfig::default();
    let rewriter = Rewriter::new(StylePattern::default(), &corrections);
    c.bench_function("deep_nesting", |b| {
        b.iter(|| {
            let mut index = EquivalenceIndex::new();
            rewriter.rewrite(&deep_jsx, &mut index)
        })
    });
}

criterion_group!(benches, bench_many_occurrences, bench_deep_nesting);
criterion_main!(benches);

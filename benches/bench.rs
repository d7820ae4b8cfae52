//! Criterion benchmarks for review classification.
//!
//! Covers the text analysis chain on its own and end-to-end prediction,
//! single and batched.

use std::collections::HashMap;
use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use veracity::analysis::analyzer::review::ReviewAnalyzer;
use veracity::ml::{ClassifierAdapter, LinearModel, Predictor};
use veracity::review::RawReviewInput;

const WORDS: &[&str] = &[
    "this", "product", "is", "amazing", "and", "great", "the", "battery", "lasts", "for",
    "days", "but", "charger", "broke", "after", "weeks", "highly", "recommend", "to",
    "everyone", "cheap", "flimsy", "boxes", "arrived", "crushed", "quality", "works",
    "perfectly", "would", "buy", "again", "never",
];

/// Generate review texts with a pseudo-random word distribution.
fn generate_reviews(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let len = 10 + (i % 60);
            (0..len)
                .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn bench_model() -> LinearModel {
    let weights: HashMap<String, f64> = WORDS
        .iter()
        .enumerate()
        .map(|(i, word)| (word.to_string(), (i as f64 - 16.0) / 16.0))
        .collect();
    LinearModel::new("bench", 0.1, weights)
}

/// Benchmark text analysis.
fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");

    let analyzer = ReviewAnalyzer::new();
    let texts = generate_reviews(1000);

    group.bench_function("tokenize_single_review", |b| {
        b.iter(|| black_box(analyzer.tokenize(black_box(&texts[0]))))
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("tokenize_batch_reviews", |b| {
        b.iter(|| {
            for text in texts.iter().take(100) {
                let _ = black_box(analyzer.tokenize(black_box(text)));
            }
        })
    });

    group.finish();
}

/// Benchmark end-to-end prediction.
fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");

    let adapter = Arc::new(ClassifierAdapter::with_model(Arc::new(bench_model())));
    let predictor = Predictor::new(adapter);
    let inputs: Vec<RawReviewInput> = generate_reviews(1000)
        .into_iter()
        .enumerate()
        .map(|(i, text)| RawReviewInput::new(text, (i % 5 + 1) as u8, i % 2 == 0, "electronics"))
        .collect();

    group.bench_function("predict_single", |b| {
        b.iter(|| black_box(predictor.predict(black_box(&inputs[0]))))
    });

    group.throughput(Throughput::Elements(inputs.len() as u64));
    group.bench_function("predict_batch", |b| {
        b.iter(|| black_box(predictor.predict_batch(black_box(&inputs))))
    });

    group.finish();
}

criterion_group!(benches, bench_text_analysis, bench_predict);

criterion_main!(benches);
